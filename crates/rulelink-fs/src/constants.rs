//! Well-known names inside a rulelink workspace.

use std::path::Path;

/// Directory and file names the sync reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspacePath {
    /// The `.cursor` configuration directory (per project and at the root)
    CursorDir,
    /// The `rules` directory inside `.cursor`
    RulesDir,
    /// The `.vscode` directory at the workspace root
    VscodeDir,
    /// The `settings.json` file inside `.vscode`
    SettingsFile,
    /// The optional `.rulelink.toml` workspace configuration
    ConfigFile,
}

impl WorkspacePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CursorDir => ".cursor",
            Self::RulesDir => "rules",
            Self::VscodeDir => ".vscode",
            Self::SettingsFile => "settings.json",
            Self::ConfigFile => ".rulelink.toml",
        }
    }
}

/// Marker prefix for entries that are never treated as projects.
pub const HIDDEN_PREFIX: char = '.';

/// Relative location of a rules directory, from either a project or the root.
pub fn rules_subpath() -> String {
    format!(
        "{}/{}",
        WorkspacePath::CursorDir.as_str(),
        WorkspacePath::RulesDir.as_str()
    )
}

/// Relative location of the editor settings file from the workspace root.
pub fn settings_subpath() -> String {
    format!(
        "{}/{}",
        WorkspacePath::VscodeDir.as_str(),
        WorkspacePath::SettingsFile.as_str()
    )
}

impl AsRef<Path> for WorkspacePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for WorkspacePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for WorkspacePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
