//! Core orchestration layer for rulelink
//!
//! Mirrors every project's `.cursor/rules` tree into the workspace root's
//! `.cursor/rules/<project>/` as symlinks, then makes sure the root
//! `.vscode/settings.json` carries the ESLint working-directory setting.
//!
//! ```text
//!                 rulelink-cli
//!                      |
//!                rulelink-core
//!   (scanner -> sync engine -> settings merger)
//!                      |
//!                 rulelink-fs
//!        (walk, link, io, config, paths)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use rulelink_core::{SyncEngine, SyncOptions};
//! use rulelink_fs::NormalizedPath;
//!
//! fn example() -> rulelink_core::Result<()> {
//!     let engine = SyncEngine::new(NormalizedPath::new("."), SyncOptions::default())?;
//!     let report = engine.run()?;
//!     println!("{} symlinks created", report.stats.created);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod scanner;
pub mod settings;
pub mod sync;

pub use config::{SettingsConfig, WorkspaceConfig};
pub use error::{Error, Result};
pub use scanner::{Project, ProjectKind, ProjectScanner};
pub use settings::{SettingsMerger, SettingsOutcome};
pub use sync::{FileAction, ProjectError, RunStatistics, SyncEngine, SyncOptions, SyncReport};
