//! SyncEngine implementation
//!
//! Mirrors each project's `.cursor/rules` tree into
//! `<root>/.cursor/rules/<project>/` and then merges the editor setting.
//! The mirror is additive: entries that no longer have a source are left
//! where they are.

use rulelink_fs::link::{self, LinkPolicy};
use rulelink_fs::{LinkOutcome, NormalizedPath, constants, io, walk};

use crate::config::WorkspaceConfig;
use crate::scanner::{Project, ProjectScanner};
use crate::settings::SettingsMerger;
use crate::{Error, Result};

use super::report::{FileAction, ProjectError, SyncReport};

/// Options for a sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Replace whatever occupies a mirror path.
    pub force: bool,
    /// Replace mirror symlinks that point at the wrong rule file.
    pub repair: bool,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

impl SyncOptions {
    fn link_policy(&self) -> LinkPolicy {
        LinkPolicy {
            force: self.force,
            repair: self.repair,
            dry_run: self.dry_run,
        }
    }
}

/// Drives a complete sync of one workspace.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    /// Canonical workspace root
    root: NormalizedPath,
    options: SyncOptions,
    config: WorkspaceConfig,
}

impl SyncEngine {
    /// Create an engine for `root`, loading `.rulelink.toml` if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkspaceUnreadable`] if the root does not resolve,
    /// or a config error if the configuration file is invalid.
    pub fn new(root: NormalizedPath, options: SyncOptions) -> Result<Self> {
        let root = canonical_root(&root)?;
        let config = WorkspaceConfig::load(&root)?;
        Ok(Self {
            root,
            options,
            config,
        })
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(
        root: NormalizedPath,
        options: SyncOptions,
        config: WorkspaceConfig,
    ) -> Result<Self> {
        Ok(Self {
            root: canonical_root(&root)?,
            options,
            config,
        })
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// `<root>/.cursor/rules`, where every project is mirrored.
    pub fn mirror_root(&self) -> NormalizedPath {
        self.root.join(&constants::rules_subpath())
    }

    /// `<root>/.vscode/settings.json`
    pub fn settings_path(&self) -> NormalizedPath {
        self.root.join(&constants::settings_subpath())
    }

    /// Run the sync.
    ///
    /// Per-file and per-project failures are recorded in the report and do
    /// not stop the run.
    ///
    /// # Errors
    ///
    /// Fails only if the mirror root cannot be created or the workspace
    /// root cannot be listed.
    pub fn run(&self) -> Result<SyncReport> {
        let mut report = SyncReport::new(self.root.clone(), self.options.dry_run);
        tracing::info!(root = %self.root, dry_run = self.options.dry_run, "Starting rule sync");

        let mirror_root = self.mirror_root();
        if !self.options.dry_run {
            io::ensure_dir(&mirror_root).map_err(|source| Error::MirrorUncreatable {
                path: mirror_root.to_native(),
                source,
            })?;
        }

        let projects = ProjectScanner::new(self.root.clone())
            .with_exclude(self.config.exclude.iter().cloned())
            .scan()?;
        report.stats.projects = projects.len();

        for project in &projects {
            if let Some(rules_dir) = project.rules_dir() {
                report.stats.projects_with_rules += 1;
                self.sync_project(project, rules_dir, &mut report);
            } else {
                tracing::debug!(
                    project = %project.name,
                    kind = ?project.kind,
                    "No rules to mirror"
                );
            }
        }
        report.projects = projects;

        if self.config.settings.enabled {
            let merger = SettingsMerger::new(self.settings_path()).dry_run(self.options.dry_run);
            report.settings =
                Some(merger.ensure_key(&self.config.settings.key, &self.config.settings.value));
        }

        tracing::info!(
            created = report.stats.created,
            skipped = report.stats.skipped,
            repaired = report.stats.repaired,
            failed = report.stats.failed,
            "Rule sync finished"
        );
        Ok(report)
    }

    fn sync_project(
        &self,
        project: &Project,
        rules_dir: &NormalizedPath,
        report: &mut SyncReport,
    ) {
        let project_mirror = self.mirror_root().join(project.dir_name());
        if !self.options.dry_run {
            if let Err(e) = io::ensure_dir(&project_mirror) {
                self.project_failed(project, e, report);
                return;
            }
        }

        let files = match walk::list_files(rules_dir) {
            Ok(files) => files,
            Err(e) => {
                self.project_failed(project, e, report);
                return;
            }
        };
        report.stats.rule_files += files.len();
        tracing::debug!(project = %project.name, count = files.len(), "Found rule files");

        let policy = self.options.link_policy();
        for relative_path in files {
            let source = rules_dir.join(&relative_path);
            let target = project_mirror.join(&relative_path);
            let outcome = link::reconcile(&source, &target, policy);
            if let LinkOutcome::Failed { error } = &outcome {
                tracing::warn!(
                    project = %project.name,
                    file = %relative_path,
                    %error,
                    "Failed to mirror rule file"
                );
            }
            report.record(FileAction {
                project: project.name.clone(),
                relative_path,
                source,
                target,
                outcome,
            });
        }
    }

    fn project_failed(
        &self,
        project: &Project,
        error: rulelink_fs::Error,
        report: &mut SyncReport,
    ) {
        tracing::warn!(project = %project.name, %error, "Failed to mirror project");
        report.project_errors.push(ProjectError {
            project: project.name.clone(),
            error: error.to_string(),
        });
    }
}

fn canonical_root(root: &NormalizedPath) -> Result<NormalizedPath> {
    root.canonicalize().map_err(|e| match e {
        rulelink_fs::Error::Io { path, source } => Error::WorkspaceUnreadable { path, source },
        other => Error::Fs(other),
    })
}
