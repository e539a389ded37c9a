//! Symlink reconciliation
//!
//! [`reconcile`] converges one target path towards "is a symlink to
//! `source`" using the smallest action the [`LinkPolicy`] allows. It never
//! returns an error: every failure is folded into [`LinkOutcome::Failed`]
//! so a caller can keep going with the next file.

use std::fs::{self, Metadata};
use std::path::Path;

use serde::Serialize;

use crate::{NormalizedPath, io};

/// How existing entries at a target path are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkPolicy {
    /// Unlink whatever occupies the target and link afresh.
    pub force: bool,
    /// Replace an existing symlink whose destination is not the source.
    /// Regular files are still left alone unless `force` is set.
    pub repair: bool,
    /// Decide the outcome without touching the filesystem.
    pub dry_run: bool,
}

/// Result of reconciling one target path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// A new symlink was created (or, with `force`, re-created).
    Created,
    /// Something already occupied the target; left untouched.
    Skipped,
    /// A symlink pointing elsewhere was replaced.
    Repaired,
    /// The target could not be brought into shape.
    Failed { error: String },
}

impl LinkOutcome {
    fn failed(action: &str, target: &NormalizedPath, err: impl std::fmt::Display) -> Self {
        Self::Failed {
            error: format!("failed to {action} {target}: {err}"),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Ensure `target` is a symlink to `source`, within the limits of `policy`.
///
/// Without `force` or `repair`, any entry already present at `target`
/// (including a dangling link) counts as synced and is not inspected.
pub fn reconcile(
    source: &NormalizedPath,
    target: &NormalizedPath,
    policy: LinkPolicy,
) -> LinkOutcome {
    if !policy.dry_run {
        if let Some(parent) = target.parent() {
            if let Err(e) = io::ensure_dir(&parent) {
                return LinkOutcome::failed("create parent directory for", target, e);
            }
        }
    }

    let existing = match fs::symlink_metadata(target.to_native()) {
        Ok(meta) => Some(meta),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return LinkOutcome::failed("inspect", target, e),
    };

    let Some(meta) = existing else {
        return create(source, target, policy, LinkOutcome::Created);
    };

    if policy.force {
        let cleared = if policy.dry_run {
            check_removable(target, &meta)
        } else {
            remove_entry(target, &meta)
        };
        if let Err(e) = cleared {
            return LinkOutcome::failed("remove existing entry at", target, e);
        }
        tracing::debug!(target = %target, "Force-replacing existing entry");
        return create(source, target, policy, LinkOutcome::Created);
    }

    if policy.repair && meta.file_type().is_symlink() {
        return match fs::read_link(target.to_native()) {
            Ok(current) if points_to(target, &current, source) => LinkOutcome::Skipped,
            Ok(current) => {
                tracing::debug!(
                    target = %target,
                    current = %current.display(),
                    "Repairing symlink with wrong destination"
                );
                if !policy.dry_run {
                    if let Err(e) = fs::remove_file(target.to_native()) {
                        return LinkOutcome::failed("remove stale symlink", target, e);
                    }
                }
                create(source, target, policy, LinkOutcome::Repaired)
            }
            Err(e) => LinkOutcome::failed("read symlink", target, e),
        };
    }

    tracing::debug!(target = %target, "Entry already present, skipping");
    LinkOutcome::Skipped
}

fn create(
    source: &NormalizedPath,
    target: &NormalizedPath,
    policy: LinkPolicy,
    success: LinkOutcome,
) -> LinkOutcome {
    if policy.dry_run {
        return success;
    }
    match symlink_file(&source.to_native(), &target.to_native()) {
        Ok(()) => {
            tracing::debug!(source = %source, target = %target, "Created symlink");
            success
        }
        Err(e) => LinkOutcome::failed("create symlink", target, e),
    }
}

fn remove_entry(target: &NormalizedPath, meta: &Metadata) -> std::io::Result<()> {
    if meta.is_dir() {
        fs::remove_dir(target.to_native())
    } else {
        fs::remove_file(target.to_native())
    }
}

/// What `remove_entry` would run into, without removing anything.
fn check_removable(target: &NormalizedPath, meta: &Metadata) -> std::io::Result<()> {
    if meta.is_dir() && fs::read_dir(target.as_path())?.next().is_some() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::DirectoryNotEmpty,
            "directory not empty",
        ));
    }
    Ok(())
}

/// Compare an existing link destination against the expected source.
/// Relative destinations are resolved against the link's own directory.
fn points_to(target: &NormalizedPath, current: &Path, source: &NormalizedPath) -> bool {
    let resolved = if current.is_relative() {
        match target.parent() {
            Some(parent) => parent.to_native().join(current),
            None => current.to_path_buf(),
        }
    } else {
        current.to_path_buf()
    };
    if NormalizedPath::new(&resolved) == *source {
        return true;
    }
    dunce::canonicalize(&resolved).is_ok_and(|real| NormalizedPath::new(real) == *source)
}

#[cfg(unix)]
fn symlink_file(source: &Path, target: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, target)
}

#[cfg(windows)]
fn symlink_file(source: &Path, target: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(source, target)
}

#[cfg(not(any(unix, windows)))]
fn symlink_file(_source: &Path, _target: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
