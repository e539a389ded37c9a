//! Editor settings merge
//!
//! Ensures a single key exists in the workspace's `.vscode/settings.json`
//! without disturbing anything a user already configured there.

use std::io::ErrorKind;

use serde::Serialize;
use serde_json::{Map, Value};

use rulelink_fs::{NormalizedPath, io};

/// What happened to the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SettingsOutcome {
    /// The file did not exist and was created with just the key.
    Created,
    /// The key was added alongside the existing settings.
    Merged,
    /// The key was already present; the file was not written.
    Unchanged,
    /// The file did not hold a JSON object and was replaced by one
    /// containing only the key. Whatever it held before is gone.
    ReplacedMalformed,
    /// Reading or writing the file failed.
    Failed { error: String },
}

impl SettingsOutcome {
    /// Whether the file was (or, in a dry run, would be) written.
    pub fn changed(&self) -> bool {
        matches!(
            self,
            Self::Created | Self::Merged | Self::ReplacedMalformed
        )
    }
}

/// Merges one key into a JSON settings file.
#[derive(Debug, Clone)]
pub struct SettingsMerger {
    path: NormalizedPath,
    dry_run: bool,
}

impl SettingsMerger {
    pub fn new(path: NormalizedPath) -> Self {
        Self {
            path,
            dry_run: false,
        }
    }

    /// Decide the outcome without writing anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Make sure `key` is present, inserting `value` if it is not.
    ///
    /// An existing value for `key` is never overwritten, whatever it is.
    /// Never returns an error; failures are reported through
    /// [`SettingsOutcome::Failed`].
    pub fn ensure_key(&self, key: &str, value: &Value) -> SettingsOutcome {
        let content = match std::fs::read(self.path.as_path()) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path, error = %e, "Cannot read settings file");
                return SettingsOutcome::Failed {
                    error: format!("failed to read {}: {e}", self.path),
                };
            }
        };

        let (mut settings, outcome) = match content {
            None => (Map::new(), SettingsOutcome::Created),
            Some(content) => match serde_json::from_slice::<Value>(&content) {
                Ok(Value::Object(map)) => (map, SettingsOutcome::Merged),
                _ => {
                    tracing::warn!(
                        path = %self.path,
                        "Settings file is not a JSON object; its contents will be replaced"
                    );
                    (Map::new(), SettingsOutcome::ReplacedMalformed)
                }
            },
        };

        if settings.contains_key(key) {
            tracing::debug!(path = %self.path, key, "Settings key already present");
            return SettingsOutcome::Unchanged;
        }
        settings.insert(key.to_string(), value.clone());

        if self.dry_run {
            return outcome;
        }
        match self.save(&Value::Object(settings)) {
            Ok(()) => {
                tracing::info!(path = %self.path, key, "Updated settings file");
                outcome
            }
            Err(error) => {
                tracing::warn!(path = %self.path, %error, "Cannot write settings file");
                SettingsOutcome::Failed { error }
            }
        }
    }

    fn save(&self, settings: &Value) -> Result<(), String> {
        let mut content = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
        content.push('\n');
        io::write_text(&self.path, &content).map_err(|e| e.to_string())
    }
}
