//! Rendering of sync reports for the terminal

use std::fmt::Write;

use colored::Colorize;
use rulelink_core::{ProjectKind, SettingsOutcome, SyncReport};
use rulelink_fs::LinkOutcome;

/// Markers used in text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    pub step: &'static str,
    pub project: &'static str,
    pub created: &'static str,
    pub skipped: &'static str,
    pub repaired: &'static str,
    pub failed: &'static str,
    pub warning: &'static str,
    pub arrow: &'static str,
}

impl Symbols {
    pub const UNICODE: Self = Self {
        step: "=>",
        project: "▸",
        created: "✓",
        skipped: "·",
        repaired: "↻",
        failed: "✗",
        warning: "⚠",
        arrow: "→",
    };

    pub const ASCII: Self = Self {
        step: "=>",
        project: ">",
        created: "[+]",
        skipped: "[=]",
        repaired: "[~]",
        failed: "[x]",
        warning: "[!]",
        arrow: "->",
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Text(Symbols),
    Json,
}

/// Render the per-project listing, settings line and summary.
pub fn render_text(report: &SyncReport, symbols: &Symbols) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_text(&mut out, report, symbols);
    out
}

fn write_text(out: &mut String, report: &SyncReport, sym: &Symbols) -> std::fmt::Result {
    let heading = if report.dry_run {
        "Syncing Cursor rules (dry run) in"
    } else {
        "Syncing Cursor rules in"
    };
    writeln!(
        out,
        "{} {} {}",
        sym.step.blue().bold(),
        heading,
        report.root.to_string().cyan()
    )?;
    writeln!(out)?;

    for project in &report.projects {
        let name = project.name.bold();
        match &project.kind {
            ProjectKind::NoConfigDir => {
                let note = "no .cursor directory".dimmed();
                writeln!(out, "{} {}  {}", sym.project, name, note)?;
            }
            ProjectKind::ConfigDirNoRules => {
                let note = "no .cursor/rules directory".dimmed();
                writeln!(out, "{} {}  {}", sym.project, name, note)?;
            }
            ProjectKind::RulesPresent { .. } => {
                let count = report.actions_for(&project.name).count();
                writeln!(
                    out,
                    "{} {}  {} rule file{} {} {}",
                    sym.project,
                    name,
                    count,
                    if count == 1 { "" } else { "s" },
                    sym.arrow,
                    project.mirror_subpath().cyan()
                )?;
                for action in report.actions_for(&project.name) {
                    let path = &action.relative_path;
                    match &action.outcome {
                        LinkOutcome::Created => {
                            writeln!(out, "   {} {}", sym.created.green(), path)?;
                        }
                        LinkOutcome::Skipped => {
                            let note = "(exists)".dimmed();
                            writeln!(out, "   {} {} {}", sym.skipped.dimmed(), path, note)?;
                        }
                        LinkOutcome::Repaired => {
                            let note = "(repaired)".yellow();
                            writeln!(out, "   {} {} {}", sym.repaired.yellow(), path, note)?;
                        }
                        LinkOutcome::Failed { error } => {
                            writeln!(out, "   {} {}: {}", sym.failed.red(), path, error)?;
                        }
                    }
                }
            }
        }
    }

    for error in &report.project_errors {
        writeln!(out, "{} {}: {}", sym.failed.red(), error.project.bold(), error.error)?;
    }

    if let Some(settings) = &report.settings {
        writeln!(out)?;
        let line = match settings {
            SettingsOutcome::Created => {
                format!("{} created .vscode/settings.json", sym.created.green())
            }
            SettingsOutcome::Merged => {
                format!("{} updated .vscode/settings.json", sym.created.green())
            }
            SettingsOutcome::Unchanged => format!(
                "{} .vscode/settings.json already configured",
                sym.skipped.dimmed()
            ),
            SettingsOutcome::ReplacedMalformed => format!(
                "{} .vscode/settings.json was not valid JSON and has been replaced",
                sym.warning.yellow()
            ),
            SettingsOutcome::Failed { error } => {
                format!("{} .vscode/settings.json: {}", sym.failed.red(), error)
            }
        };
        writeln!(out, "{line}")?;
    }

    let stats = &report.stats;
    writeln!(out)?;
    writeln!(out, "{}", "Summary".bold())?;
    writeln!(
        out,
        "   Projects:   {} ({} with rules)",
        stats.projects, stats.projects_with_rules
    )?;
    writeln!(out, "   Rule files: {}", stats.rule_files)?;
    writeln!(out, "   Created:    {}", stats.created)?;
    writeln!(out, "   Skipped:    {}", stats.skipped)?;
    if stats.repaired > 0 {
        writeln!(out, "   Repaired:   {}", stats.repaired)?;
    }
    writeln!(out, "   Failed:     {}", stats.failed)?;
    let settings = match &report.settings {
        None => "disabled",
        Some(outcome) if outcome.changed() => "updated",
        Some(SettingsOutcome::Failed { .. }) => "failed",
        Some(_) => "unchanged",
    };
    writeln!(out, "   Settings:   {settings}")?;
    Ok(())
}
