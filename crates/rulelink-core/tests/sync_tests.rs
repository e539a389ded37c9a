//! SyncEngine behaviour against real workspaces.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::symlink;

use pretty_assertions::assert_eq;
use rulelink_core::{
    ProjectKind, RunStatistics, SettingsOutcome, SyncEngine, SyncOptions, WorkspaceConfig,
};
use rulelink_fs::{LinkOutcome, NormalizedPath};
use rulelink_test_utils::TestWorkspace;

fn run(ws: &TestWorkspace, options: SyncOptions) -> rulelink_core::SyncReport {
    SyncEngine::new(NormalizedPath::new(ws.root()), options)
        .unwrap()
        .run()
        .unwrap()
}

fn two_project_workspace() -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.add_rule("projA", "x.mdc", "rule x");
    ws.add_rule("projB", "sub/y.mdc", "rule y");
    ws
}

#[test]
fn mirrors_two_projects_from_scratch() {
    let ws = two_project_workspace();

    let report = run(&ws, SyncOptions::default());

    assert_eq!(
        report.stats,
        RunStatistics {
            projects: 2,
            projects_with_rules: 2,
            rule_files: 2,
            created: 2,
            skipped: 0,
            repaired: 0,
            failed: 0,
        }
    );
    ws.assert_mirrored("projA", "x.mdc");
    ws.assert_mirrored("projB", "sub/y.mdc");
    assert_eq!(
        fs::read_to_string(ws.mirror_path("projB", "sub/y.mdc")).unwrap(),
        "rule y"
    );
}

#[test]
fn second_run_is_all_skipped() {
    let ws = two_project_workspace();
    run(&ws, SyncOptions::default());

    let report = run(&ws, SyncOptions::default());

    assert_eq!(report.stats.created, 0);
    assert_eq!(report.stats.skipped, 2);
    assert_eq!(report.stats.failed, 0);
    assert_eq!(report.settings, Some(SettingsOutcome::Unchanged));
    ws.assert_mirrored("projA", "x.mdc");
    ws.assert_mirrored("projB", "sub/y.mdc");
}

#[test]
fn projects_are_classified_in_name_order() {
    let ws = TestWorkspace::new();
    ws.add_rule("zeta", "z.mdc", "z");
    ws.add_config_dir("mid");
    ws.add_project("alpha");
    ws.add_rule(".git", "hooks.mdc", "never a project");
    ws.write("README.md", "not a directory");

    let report = run(&ws, SyncOptions::default());

    let summary: Vec<(&str, bool)> = report
        .projects
        .iter()
        .map(|p| (p.name.as_str(), p.rules_dir().is_some()))
        .collect();
    assert_eq!(summary, vec![("alpha", false), ("mid", false), ("zeta", true)]);
    assert_eq!(report.projects[0].kind, ProjectKind::NoConfigDir);
    assert_eq!(report.projects[1].kind, ProjectKind::ConfigDirNoRules);
    assert_eq!(report.stats.projects, 3);
    assert_eq!(report.stats.projects_with_rules, 1);
    ws.assert_not_exists(".cursor/rules/.git");
}

#[test]
fn projects_without_rules_get_no_mirror_dir() {
    let ws = TestWorkspace::new();
    ws.add_config_dir("docs");

    let report = run(&ws, SyncOptions::default());

    ws.assert_exists(".cursor/rules");
    ws.assert_not_exists(".cursor/rules/docs");
    assert_eq!(report.stats.rule_files, 0);
}

#[test]
fn empty_rules_dir_still_gets_mirror_dir() {
    let ws = TestWorkspace::new();
    fs::create_dir_all(ws.root().join("app/.cursor/rules")).unwrap();

    let report = run(&ws, SyncOptions::default());

    ws.assert_exists(".cursor/rules/app");
    assert_eq!(report.stats.projects_with_rules, 1);
    assert!(report.actions.is_empty());
}

#[test]
fn existing_unrelated_entry_is_skipped_without_force() {
    let ws = two_project_workspace();
    ws.write(".cursor/rules/projA/x.mdc", "hand written");

    let report = run(&ws, SyncOptions::default());

    assert_eq!(report.stats.created, 1);
    assert_eq!(report.stats.skipped, 1);
    let action = report.actions_for("projA").next().unwrap();
    assert_eq!(action.outcome, LinkOutcome::Skipped);
    assert_eq!(
        fs::read_to_string(ws.mirror_path("projA", "x.mdc")).unwrap(),
        "hand written"
    );
}

#[test]
fn force_replaces_unrelated_entries() {
    let ws = two_project_workspace();
    ws.write(".cursor/rules/projA/x.mdc", "hand written");
    let elsewhere = ws.write("elsewhere.mdc", "other");
    fs::create_dir_all(ws.mirror_path("projB", "sub")).unwrap();
    symlink(&elsewhere, ws.mirror_path("projB", "sub/y.mdc")).unwrap();

    let report = run(
        &ws,
        SyncOptions {
            force: true,
            ..Default::default()
        },
    );

    assert_eq!(report.stats.created, 2);
    assert_eq!(report.stats.skipped, 0);
    ws.assert_mirrored("projA", "x.mdc");
    ws.assert_mirrored("projB", "sub/y.mdc");
}

#[test]
fn repair_fixes_only_wrong_links() {
    let ws = two_project_workspace();
    run(&ws, SyncOptions::default());
    let elsewhere = ws.write("elsewhere.mdc", "other");
    let stale = ws.mirror_path("projA", "x.mdc");
    fs::remove_file(&stale).unwrap();
    symlink(&elsewhere, &stale).unwrap();

    let report = run(
        &ws,
        SyncOptions {
            repair: true,
            ..Default::default()
        },
    );

    assert_eq!(report.stats.repaired, 1);
    assert_eq!(report.stats.skipped, 1);
    ws.assert_mirrored("projA", "x.mdc");
}

#[test]
fn stale_mirror_entries_are_kept() {
    let ws = two_project_workspace();
    run(&ws, SyncOptions::default());
    fs::remove_file(ws.root().join("projA/.cursor/rules/x.mdc")).unwrap();

    run(&ws, SyncOptions::default());

    assert!(fs::symlink_metadata(ws.mirror_path("projA", "x.mdc")).is_ok());
}

#[test]
fn dry_run_changes_nothing() {
    let ws = two_project_workspace();

    let report = run(
        &ws,
        SyncOptions {
            dry_run: true,
            ..Default::default()
        },
    );

    assert!(report.dry_run);
    assert_eq!(report.stats.created, 2);
    assert_eq!(report.settings, Some(SettingsOutcome::Created));
    ws.assert_not_exists(".cursor");
    ws.assert_not_exists(".vscode");
}

#[test]
fn failing_file_does_not_stop_other_projects() {
    let ws = two_project_workspace();
    ws.add_rule("projA", "y.mdc", "rule y in A");
    // A non-empty directory where a link should go cannot be force-removed
    fs::create_dir_all(ws.mirror_path("projA", "x.mdc").join("occupied")).unwrap();

    let report = run(
        &ws,
        SyncOptions {
            force: true,
            ..Default::default()
        },
    );

    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.stats.created, 2);
    assert!(report.has_failures());
    ws.assert_mirrored("projA", "y.mdc");
    ws.assert_mirrored("projB", "sub/y.mdc");
}

#[test]
fn blocked_project_mirror_is_a_project_error() {
    let ws = two_project_workspace();
    ws.write(".cursor/rules/projA", "a file where a directory should be");

    let report = run(&ws, SyncOptions::default());

    assert_eq!(report.project_errors.len(), 1);
    assert_eq!(report.project_errors[0].project, "projA");
    assert_eq!(report.stats.created, 1);
    ws.assert_mirrored("projB", "sub/y.mdc");
}

#[test]
fn blocked_mirror_root_is_fatal() {
    let ws = two_project_workspace();
    ws.write(".cursor", "a file where a directory should be");

    let result = SyncEngine::new(NormalizedPath::new(ws.root()), SyncOptions::default())
        .unwrap()
        .run();

    assert!(matches!(
        result,
        Err(rulelink_core::Error::MirrorUncreatable { .. })
    ));
}

#[test]
fn config_file_excludes_projects_and_settings() {
    let ws = two_project_workspace();
    ws.write(
        ".rulelink.toml",
        "exclude = [\"projB\"]\n\n[settings]\nenabled = false\n",
    );

    let report = run(&ws, SyncOptions::default());

    assert_eq!(report.stats.projects, 1);
    assert_eq!(report.settings, None);
    ws.assert_mirrored("projA", "x.mdc");
    ws.assert_not_exists(".cursor/rules/projB");
    ws.assert_not_exists(".vscode/settings.json");
}

#[test]
fn explicit_config_overrides_file() {
    let ws = two_project_workspace();
    let mut config = WorkspaceConfig::default();
    config.settings.key = "custom.key".into();
    config.settings.value = serde_json::json!(true);

    let report = SyncEngine::with_config(
        NormalizedPath::new(ws.root()),
        SyncOptions::default(),
        config,
    )
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(report.settings, Some(SettingsOutcome::Created));
    assert_eq!(
        ws.read_json(".vscode/settings.json"),
        serde_json::json!({"custom.key": true})
    );
}

#[test]
fn backslash_in_rule_file_name_is_mirrored_verbatim() {
    let ws = TestWorkspace::new();
    ws.add_rule("projA", "a\\b.mdc", "rule");

    let report = run(&ws, SyncOptions::default());

    assert_eq!(report.stats.created, 1);
    assert_eq!(report.actions[0].relative_path.to_string(), "a\\b.mdc");
    ws.assert_mirrored("projA", "a\\b.mdc");
    ws.assert_not_exists(".cursor/rules/projA/a");
    assert_eq!(fs::read_to_string(ws.mirror_path("projA", "a\\b.mdc")).unwrap(), "rule");
}

#[test]
fn symlinked_rule_file_is_mirrored() {
    let ws = TestWorkspace::new();
    let shared = ws.write("shared/common.mdc", "shared rule");
    fs::create_dir_all(ws.root().join("projA/.cursor/rules")).unwrap();
    symlink(&shared, ws.root().join("projA/.cursor/rules/common.mdc")).unwrap();

    let report = run(&ws, SyncOptions::default());

    assert_eq!(report.stats.rule_files, 1);
    assert_eq!(report.stats.created, 1);
    ws.assert_mirrored("projA", "common.mdc");
    assert_eq!(
        fs::read_to_string(ws.mirror_path("projA", "common.mdc")).unwrap(),
        "shared rule"
    );
}

#[test]
fn non_utf8_project_name_is_mirrored_under_its_own_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let ws = TestWorkspace::new();
    let name = OsStr::from_bytes(b"proj\xff");
    let rules = ws.root().join(name).join(".cursor/rules");
    if fs::create_dir_all(&rules).is_err() {
        eprintln!("Skipping test: filesystem rejects non-UTF-8 names");
        return;
    }
    fs::write(rules.join("x.mdc"), "rule").unwrap();

    let report = run(&ws, SyncOptions::default());

    assert_eq!(report.stats.projects_with_rules, 1);
    assert_eq!(report.stats.created, 1);
    let link = ws.root().join(".cursor/rules").join(name).join("x.mdc");
    assert_eq!(
        fs::read_link(&link).unwrap(),
        ws.canonical_root().join(name).join(".cursor/rules/x.mdc")
    );
}
