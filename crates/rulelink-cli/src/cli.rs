//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use rulelink_core::SyncOptions;

use crate::output::{OutputStyle, Symbols};

/// Mirror every project's `.cursor/rules` into the workspace root as symlinks
///
/// Run from a directory containing several projects. Each project's
/// `.cursor/rules/**` is linked under `.cursor/rules/<project>/` at the
/// root, and `.vscode/settings.json` gets `eslint.workingDirectories`
/// unless it already has it.
#[derive(Parser, Debug)]
#[command(name = "rulelink")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Use plain ASCII markers and no color
    #[arg(long)]
    pub ascii: bool,

    /// Replace anything already present at a mirror path
    #[arg(short, long)]
    pub force: bool,

    /// Replace mirror symlinks that point at the wrong rule file
    #[arg(long)]
    pub repair: bool,

    /// Show what would change without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Workspace root (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            force: self.force,
            repair: self.repair,
            dry_run: self.dry_run,
        }
    }

    pub fn output_style(&self) -> OutputStyle {
        if self.json {
            OutputStyle::Json
        } else if self.ascii {
            OutputStyle::Text(Symbols::ASCII)
        } else {
            OutputStyle::Text(Symbols::UNICODE)
        }
    }
}
