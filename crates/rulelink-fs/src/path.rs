//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::constants::HIDDEN_PREFIX;
use crate::{Error, Result};

/// A filesystem path with one separator convention.
///
/// Rule files are identified by their path relative to a rules directory,
/// and that relative path is reused verbatim under the root mirror. On
/// Windows both `\` and `/` separate components, so backslashes are folded
/// into forward slashes there. Elsewhere `\` is an ordinary filename
/// character and the path is stored exactly as the OS reported it,
/// including names that are not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: PathBuf,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: normalize(path.as_ref()),
        }
    }

    /// Resolve to an absolute, symlink-free path.
    ///
    /// Uses `dunce` so Windows paths do not come back in `\\?\` form.
    pub fn canonicalize(&self) -> Result<Self> {
        dunce::canonicalize(&self.inner)
            .map(Self::new)
            .map_err(|e| Error::io(&self.inner, e))
    }

    /// Borrow as a platform path for I/O operations.
    pub fn as_path(&self) -> &Path {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        self.inner.clone()
    }

    /// Join this path with a relative segment.
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        Self::new(self.inner.join(segment))
    }

    /// Express this path relative to `base`.
    ///
    /// Returns `None` if `base` is not a component-wise prefix of this path,
    /// or if both are the same path.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<Self> {
        let rest = self.inner.strip_prefix(&base.inner).ok()?;
        if rest.as_os_str().is_empty() {
            return None;
        }
        Some(Self::new(rest))
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        self.inner
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Self::new)
    }

    /// Get the file name component, if it is valid UTF-8.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.file_name().and_then(|name| name.to_str())
    }

    /// Whether the final component starts with the hidden-entry marker.
    pub fn is_hidden(&self) -> bool {
        self.inner
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with(HIDDEN_PREFIX))
    }

    /// Check if anything (including a dangling symlink) exists at this path.
    pub fn exists_entry(&self) -> bool {
        std::fs::symlink_metadata(&self.inner).is_ok()
    }

    /// Check if this path exists on the filesystem, following symlinks.
    pub fn exists(&self) -> bool {
        self.inner.exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.inner.is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.inner.is_file()
    }

    /// Check if this entry is itself a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.inner.is_symlink()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.inner.extension().and_then(|ext| ext.to_str())
    }
}

#[cfg(windows)]
fn normalize(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().replace('\\', "/"))
}

#[cfg(not(windows))]
fn normalize(path: &Path) -> PathBuf {
    path.to_path_buf()
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        &self.inner
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.display())
    }
}

impl serde::Serialize for NormalizedPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.inner.to_string_lossy())
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
