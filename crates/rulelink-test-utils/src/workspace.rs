//! [`TestWorkspace`] builder for rule-sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary multi-project workspace with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use rulelink_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.add_rule("projA", "x.mdc", "always use tabs");
/// ws.add_project("docs");
/// ws.assert_exists("projA/.cursor/rules/x.mdc");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary workspace root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the workspace root as given by the temp directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Return the canonical workspace root, which is what symlinks point into.
    pub fn canonical_root(&self) -> PathBuf {
        fs::canonicalize(self.root()).unwrap()
    }

    /// Create a project directory with no `.cursor` directory.
    pub fn add_project(&self, name: &str) -> PathBuf {
        let dir = self.root().join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Create a project whose `.cursor` directory has no `rules` inside.
    pub fn add_config_dir(&self, project: &str) -> PathBuf {
        let dir = self.root().join(project).join(".cursor");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write `content` to `<project>/.cursor/rules/<relative>`.
    pub fn add_rule(&self, project: &str, relative: &str, content: &str) -> PathBuf {
        self.write(
            &format!("{project}/.cursor/rules/{relative}"),
            content,
        )
    }

    /// Write a file at `path` (relative to the root), creating parents.
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Read `path` (relative to root) as JSON.
    ///
    /// # Panics
    /// Panics if the file is missing or not valid JSON.
    pub fn read_json(&self, path: &str) -> Value {
        let full_path = self.root().join(path);
        let content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Invalid JSON in {}: {e}", full_path.display()))
    }

    /// Path of the mirrored entry for `<project>/<relative>` under `.cursor/rules`.
    pub fn mirror_path(&self, project: &str, relative: &str) -> PathBuf {
        self.root()
            .join(".cursor/rules")
            .join(project)
            .join(relative)
    }

    /// Assert that `path` (relative to the root) exists.
    pub fn assert_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected path to exist: {}",
            full_path.display()
        );
    }

    /// Assert that nothing, not even a dangling link, exists at `path`.
    pub fn assert_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            fs::symlink_metadata(&full_path).is_err(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the mirror of `<project>/<relative>` is a symlink whose
    /// destination is the original rule file's absolute path.
    pub fn assert_mirrored(&self, project: &str, relative: &str) {
        let link = self.mirror_path(project, relative);
        let meta = fs::symlink_metadata(&link)
            .unwrap_or_else(|_| panic!("Missing mirror entry: {}", link.display()));
        assert!(
            meta.file_type().is_symlink(),
            "Expected a symlink at {}",
            link.display()
        );

        let destination = fs::read_link(&link).unwrap();
        let expected = self
            .canonical_root()
            .join(project)
            .join(".cursor/rules")
            .join(relative);
        assert_eq!(
            destination,
            expected,
            "Symlink {} points at the wrong file",
            link.display()
        );
    }
}
