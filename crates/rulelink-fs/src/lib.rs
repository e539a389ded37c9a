//! Filesystem layer for rulelink
//!
//! Provides normalized paths, atomic I/O, recursive file enumeration and
//! symlink reconciliation. Nothing here knows about projects or settings;
//! that lives in `rulelink-core`.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod link;
pub mod path;
pub mod walk;

pub use config::ConfigStore;
pub use constants::WorkspacePath;
pub use error::{Error, Result};
pub use link::{LinkOutcome, LinkPolicy};
pub use path::NormalizedPath;
