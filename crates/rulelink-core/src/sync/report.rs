//! Results of a sync run

use serde::Serialize;

use rulelink_fs::{LinkOutcome, NormalizedPath};

use crate::scanner::Project;
use crate::settings::SettingsOutcome;

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Non-hidden top-level directories scanned.
    pub projects: usize,
    /// Projects that have a `.cursor/rules` directory.
    pub projects_with_rules: usize,
    /// Rule files discovered across all projects.
    pub rule_files: usize,
    pub created: usize,
    pub skipped: usize,
    pub repaired: usize,
    pub failed: usize,
}

impl RunStatistics {
    pub fn record(&mut self, outcome: &LinkOutcome) {
        match outcome {
            LinkOutcome::Created => self.created += 1,
            LinkOutcome::Skipped => self.skipped += 1,
            LinkOutcome::Repaired => self.repaired += 1,
            LinkOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// One reconciled rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAction {
    pub project: String,
    /// Path relative to the project's rules directory.
    pub relative_path: NormalizedPath,
    pub source: NormalizedPath,
    pub target: NormalizedPath,
    #[serde(flatten)]
    pub outcome: LinkOutcome,
}

/// A project that could not be mirrored at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectError {
    pub project: String,
    pub error: String,
}

/// Everything a run did, in the order it did it.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub root: NormalizedPath,
    pub dry_run: bool,
    pub stats: RunStatistics,
    pub projects: Vec<Project>,
    pub actions: Vec<FileAction>,
    pub project_errors: Vec<ProjectError>,
    /// `None` when the settings merge is disabled by configuration.
    pub settings: Option<SettingsOutcome>,
}

impl SyncReport {
    pub fn new(root: NormalizedPath, dry_run: bool) -> Self {
        Self {
            root,
            dry_run,
            stats: RunStatistics::default(),
            projects: Vec::new(),
            actions: Vec::new(),
            project_errors: Vec::new(),
            settings: None,
        }
    }

    /// Record a per-file outcome and update the counters.
    pub fn record(&mut self, action: FileAction) {
        self.stats.record(&action.outcome);
        self.actions.push(action);
    }

    /// Actions belonging to one project.
    pub fn actions_for<'a>(&'a self, project: &'a str) -> impl Iterator<Item = &'a FileAction> {
        self.actions.iter().filter(move |a| a.project == project)
    }

    /// Whether any file, project, or the settings merge failed.
    pub fn has_failures(&self) -> bool {
        self.stats.failed > 0
            || !self.project_errors.is_empty()
            || matches!(self.settings, Some(SettingsOutcome::Failed { .. }))
    }
}
