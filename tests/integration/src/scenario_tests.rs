//! Whole-workspace scenarios for the rule mirror.
//!
//! These compare complete filesystem snapshots rather than individual
//! paths, so any unexpected entry created or removed by a run shows up.

#![cfg(unix)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use rulelink_core::{RunStatistics, SettingsOutcome, SyncEngine, SyncOptions, SyncReport};
use rulelink_fs::NormalizedPath;
use rulelink_test_utils::TestWorkspace;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Dir,
    File(String),
    Link(String),
}

/// Every entry under `root`, keyed by relative path. Links are not followed.
fn snapshot(root: &Path) -> BTreeMap<String, Entry> {
    fn visit(root: &Path, dir: &Path, out: &mut BTreeMap<String, Entry>) {
        for entry in fs::read_dir(dir).unwrap() {
            let entry = entry.unwrap();
            let path = entry.path();
            let key = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
            let file_type = entry.file_type().unwrap();
            if file_type.is_symlink() {
                let destination = fs::read_link(&path).unwrap();
                out.insert(key, Entry::Link(destination.to_string_lossy().into_owned()));
            } else if file_type.is_dir() {
                out.insert(key, Entry::Dir);
                visit(root, &path, out);
            } else {
                out.insert(key, Entry::File(fs::read_to_string(&path).unwrap()));
            }
        }
    }
    let mut out = BTreeMap::new();
    visit(root, root, &mut out);
    out
}

fn sync(ws: &TestWorkspace, options: SyncOptions) -> SyncReport {
    SyncEngine::new(NormalizedPath::new(ws.root()), options)
        .unwrap()
        .run()
        .unwrap()
}

fn monorepo() -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.add_rule("projA", "x.mdc", "rule x");
    ws.add_rule("projB", "sub/y.mdc", "rule y");
    ws.add_rule("projB", "sub/deeper/z.mdc", "rule z");
    ws.add_config_dir("tooling");
    ws.add_project("docs");
    ws.add_rule(".git", "ignored.mdc", "never mirrored");
    ws.write(".vscode/settings.json", r#"{"editor.tabSize": 2}"#);
    ws
}

#[test]
fn two_projects_mirror_from_scratch() {
    let ws = TestWorkspace::new();
    ws.add_rule("projA", "x.mdc", "x");
    ws.add_rule("projB", "sub/y.mdc", "y");

    let report = sync(&ws, SyncOptions::default());

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
}

#[test]
fn second_run_leaves_identical_filesystem() {
    let ws = monorepo();
    let first = sync(&ws, SyncOptions::default());
    let after_first = snapshot(ws.root());

    let second = sync(&ws, SyncOptions::default());
    let after_second = snapshot(ws.root());

    assert_eq!(first.stats.created, 3);
    assert_eq!(second.stats.created, 0);
    assert_eq!(second.stats.skipped, 3);
    assert_eq!(second.stats.failed, 0);
    assert_eq!(second.settings, Some(SettingsOutcome::Unchanged));
    assert_eq!(after_first, after_second);
}

#[test]
fn every_rule_file_has_exactly_one_mirror() {
    let ws = monorepo();

    sync(&ws, SyncOptions::default());

    let canonical = ws.canonical_root();
    let links: BTreeMap<String, String> = snapshot(ws.root())
        .into_iter()
        .filter_map(|(path, entry)| match entry {
            Entry::Link(destination) => Some((path, destination)),
            _ => None,
        })
        .collect();
    let expected: BTreeMap<String, String> = [
        ("projA", "x.mdc"),
        ("projB", "sub/deeper/z.mdc"),
        ("projB", "sub/y.mdc"),
    ]
    .into_iter()
    .map(|(project, relative)| {
        (
            format!(".cursor/rules/{project}/{relative}"),
            canonical
                .join(project)
                .join(".cursor/rules")
                .join(relative)
                .to_string_lossy()
                .into_owned(),
        )
    })
    .collect();
    assert_eq!(links, expected);
}

#[test]
fn mirror_is_readable_through_links() {
    let ws = monorepo();

    sync(&ws, SyncOptions::default());

    assert_eq!(
        fs::read_to_string(ws.mirror_path("projB", "sub/deeper/z.mdc")).unwrap(),
        "rule z"
    );
}

#[test]
fn settings_merge_preserves_user_settings() {
    let ws = monorepo();

    let report = sync(&ws, SyncOptions::default());

    assert_eq!(report.settings, Some(SettingsOutcome::Merged));
    assert_eq!(
        ws.read_json(".vscode/settings.json"),
        json!({
            "editor.tabSize": 2,
            "eslint.workingDirectories": [{"mode": "auto"}]
        })
    );
}

#[test]
fn only_root_mirror_and_settings_change() {
    let ws = monorepo();
    let before = snapshot(ws.root());

    sync(&ws, SyncOptions::default());
    let after = snapshot(ws.root());

    let changed: Vec<&String> = after
        .iter()
        .filter(|(path, entry)| before.get(*path) != Some(*entry))
        .map(|(path, _)| path)
        .filter(|path| !path.starts_with(".cursor"))
        .collect();
    assert_eq!(changed, vec![".vscode/settings.json"]);
    assert!(before.keys().all(|path| after.contains_key(path)));
}

#[test]
fn dry_run_snapshot_is_unchanged() {
    let ws = monorepo();
    let before = snapshot(ws.root());

    let report = sync(
        &ws,
        SyncOptions {
            dry_run: true,
            ..Default::default()
        },
    );

    assert_eq!(report.stats.created, 3);
    assert_eq!(snapshot(ws.root()), before);
}
