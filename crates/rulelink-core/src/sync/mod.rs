//! Rule mirroring
//!
//! - **engine**: [`SyncEngine`] drives a whole run: scan, mirror, settings
//! - **report**: [`SyncReport`] and [`RunStatistics`] describing what happened

mod engine;
mod report;

pub use engine::{SyncEngine, SyncOptions};
pub use report::{FileAction, ProjectError, RunStatistics, SyncReport};
