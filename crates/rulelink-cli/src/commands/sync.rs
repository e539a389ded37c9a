//! The sync command
//!
//! Builds a [`SyncEngine`] for the workspace root, runs it and prints the
//! report. Per-file failures are part of the report, not an error exit.

use std::path::Path;

use rulelink_core::{SyncEngine, SyncOptions, SyncReport};
use rulelink_fs::NormalizedPath;

use crate::error::Result;
use crate::output::{self, OutputStyle};

/// Run a sync of the workspace at `path` and print the outcome.
pub fn run_sync(path: &Path, options: SyncOptions, style: OutputStyle) -> Result<()> {
    let report = sync(path, options)?;

    match style {
        OutputStyle::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputStyle::Text(symbols) => print!("{}", output::render_text(&report, &symbols)),
    }

    Ok(())
}

fn sync(path: &Path, options: SyncOptions) -> Result<SyncReport> {
    let engine = SyncEngine::new(NormalizedPath::new(path), options)?;
    Ok(engine.run()?)
}
