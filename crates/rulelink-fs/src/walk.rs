//! Recursive enumeration of the non-directory entries under a directory

use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// List every entry below `dir` that is not a directory, as paths relative
/// to `dir`.
///
/// Descent depth is unbounded but driven by an iterator, not call-stack
/// recursion. Entries are sorted by file name at each level so the result
/// is stable for a given filesystem snapshot. Symbolic links are reported
/// by their own entry type and never followed: a symlink (to a file or a
/// directory) is listed like a file, and a symlinked directory is never
/// descended into, so it cannot introduce a cycle.
///
/// # Errors
///
/// Returns [`Error::Io`] for the first directory that cannot be read.
pub fn list_files(dir: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let root = dir.to_native();
    let walker = WalkDir::new(&root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| root.clone());
            Error::io(path, std::io::Error::from(e))
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        match entry.path().strip_prefix(&root) {
            Ok(relative) => files.push(NormalizedPath::new(relative)),
            Err(_) => {
                tracing::debug!(
                    path = %entry.path().display(),
                    "Entry outside walk root, ignoring"
                );
            }
        }
    }

    tracing::debug!(dir = %dir, count = files.len(), "Enumerated rule files");
    Ok(files)
}
