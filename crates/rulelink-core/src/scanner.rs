//! Project discovery
//!
//! A project is any direct, non-hidden child directory of the workspace
//! root. Each one is classified by how far its `.cursor/rules` path exists.

use std::ffi::OsStr;
use std::fs;

use serde::Serialize;

use rulelink_fs::{NormalizedPath, WorkspacePath, constants};

use crate::{Error, Result};

/// How far a project's rule directory exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProjectKind {
    /// No `.cursor` directory.
    NoConfigDir,
    /// `.cursor` exists but has no `rules` directory.
    ConfigDirNoRules,
    /// `.cursor/rules` exists and is a directory.
    RulesPresent { rules_dir: NormalizedPath },
}

/// A top-level project directory of the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub name: String,
    pub path: NormalizedPath,
    #[serde(flatten)]
    pub kind: ProjectKind,
}

impl Project {
    /// The project's rule directory, if it has one.
    pub fn rules_dir(&self) -> Option<&NormalizedPath> {
        match &self.kind {
            ProjectKind::RulesPresent { rules_dir } => Some(rules_dir),
            _ => None,
        }
    }

    /// The project's directory name exactly as stored on disk.
    ///
    /// `name` is a display form and loses bytes that are not UTF-8.
    pub fn dir_name(&self) -> &OsStr {
        self.path
            .as_path()
            .file_name()
            .unwrap_or_else(|| OsStr::new(&self.name))
    }

    /// Location of this project's mirror, relative to the workspace root.
    pub fn mirror_subpath(&self) -> String {
        format!("{}/{}", constants::rules_subpath(), self.name)
    }
}

/// Lists and classifies the projects under a workspace root.
#[derive(Debug, Clone)]
pub struct ProjectScanner {
    root: NormalizedPath,
    exclude: Vec<String>,
}

impl ProjectScanner {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            exclude: Vec::new(),
        }
    }

    /// Skip top-level directories with any of these names.
    pub fn with_exclude(mut self, exclude: impl IntoIterator<Item = String>) -> Self {
        self.exclude = exclude.into_iter().collect();
        self
    }

    /// Scan the workspace root, returning projects sorted by name.
    ///
    /// Only real directories count; symlinks and files at the top level are
    /// ignored, as are names starting with `.`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkspaceUnreadable`] if the root cannot be listed.
    pub fn scan(&self) -> Result<Vec<Project>> {
        let native_root = self.root.to_native();
        let unreadable = |source| Error::WorkspaceUnreadable {
            path: native_root.clone(),
            source,
        };

        let mut projects = Vec::new();
        for entry in fs::read_dir(&native_root).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            let dir_name = entry.file_name();
            let name = dir_name.to_string_lossy().into_owned();
            let path = self.root.join(&dir_name);

            if path.is_hidden() {
                tracing::debug!(project = %name, "Skipping hidden directory");
                continue;
            }
            if self.exclude.iter().any(|excluded| *excluded == name) {
                tracing::debug!(project = %name, "Skipping excluded directory");
                continue;
            }
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => {}
                _ => continue,
            }

            let kind = Self::classify(&path);
            projects.push(Project { name, path, kind });
        }

        projects.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(count = projects.len(), "Scanned workspace projects");
        Ok(projects)
    }

    /// Classify a single project directory.
    pub fn classify(project: &NormalizedPath) -> ProjectKind {
        let config_dir = project.join(WorkspacePath::CursorDir.as_str());
        if !config_dir.is_dir() {
            return ProjectKind::NoConfigDir;
        }
        let rules_dir = config_dir.join(WorkspacePath::RulesDir.as_str());
        if !rules_dir.is_dir() {
            return ProjectKind::ConfigDirNoRules;
        }
        ProjectKind::RulesPresent { rules_dir }
    }
}
