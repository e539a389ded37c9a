//! Workspace configuration
//!
//! Read from the optional `.rulelink.toml` at the workspace root. Every
//! field has a default, so a workspace without the file behaves exactly as
//! if it contained the defaults below.
//!
//! ```toml
//! exclude = ["node_modules"]
//!
//! [settings]
//! enabled = true
//! key = "eslint.workingDirectories"
//! value = [{ mode = "auto" }]
//! ```

use serde::Deserialize;
use serde_json::{Value, json};

use rulelink_fs::{ConfigStore, NormalizedPath, WorkspacePath};

use crate::Result;

/// Settings key merged into `.vscode/settings.json` by default.
pub const DEFAULT_SETTINGS_KEY: &str = "eslint.workingDirectories";

/// Value inserted for [`DEFAULT_SETTINGS_KEY`] when absent.
pub fn default_settings_value() -> Value {
    json!([{ "mode": "auto" }])
}

/// Top-level workspace configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Top-level directory names that are never treated as projects.
    pub exclude: Vec<String>,
    /// Editor settings merge.
    pub settings: SettingsConfig,
}

/// Controls the `.vscode/settings.json` merge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsConfig {
    pub enabled: bool,
    pub key: String,
    pub value: Value,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key: DEFAULT_SETTINGS_KEY.to_string(),
            value: default_settings_value(),
        }
    }
}

impl WorkspaceConfig {
    /// Path of the configuration file for a workspace root.
    pub fn path(root: &NormalizedPath) -> NormalizedPath {
        root.join(WorkspacePath::ConfigFile.as_str())
    }

    /// Load the configuration for `root`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// A file that exists but does not parse is an error; unlike the editor
    /// settings, it was written for this tool and guessing would hide a typo.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = Self::path(root);
        let config = ConfigStore::new().load_optional(&path)?;
        if config.is_some() {
            tracing::debug!(path = %path, "Loaded workspace configuration");
        }
        Ok(config.unwrap_or_default())
    }
}
