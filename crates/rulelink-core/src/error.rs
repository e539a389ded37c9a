//! Error types for rulelink-core
//!
//! Only conditions that stop a whole run are represented here. Per-file
//! and per-project problems are recorded in the
//! [`SyncReport`](crate::SyncReport) instead.

use std::path::PathBuf;

/// Result type for rulelink-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rulelink-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The workspace root could not be resolved or listed
    #[error("Cannot read workspace root {path}: {source}")]
    WorkspaceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The root `.cursor/rules` mirror directory could not be created
    #[error("Cannot create rules directory {path}: {source}")]
    MirrorUncreatable {
        path: PathBuf,
        #[source]
        source: rulelink_fs::Error,
    },

    /// Filesystem error from rulelink-fs
    #[error(transparent)]
    Fs(#[from] rulelink_fs::Error),
}
