//! Directory removal, permanent or to the system trash.
//!
//! # Overview
//!
//! Duplicate directories and merged-away sources are removed through this
//! module:
//! - Permanent recursive deletion (default)
//! - Move to system trash via the `trash` crate (recoverable)
//! - Batch removal that keeps going past individual failures
//!
//! # Example
//!
//! ```no_run
//! use dirdupe::actions::delete::{remove_directory, DeleteConfig};
//! use std::path::Path;
//!
//! match remove_directory(Path::new("/data/old-copy"), &DeleteConfig::permanent()) {
//!     Ok(result) => println!("Deleted: {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// Directory was not found (may have been deleted or moved).
    #[error("directory not found: {0}")]
    NotFound(PathBuf),

    /// Path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0} - try running with elevated privileges")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Result of a successful removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    /// Directory that was removed.
    pub path: PathBuf,
    /// Whether removal was permanent (true) or to trash (false).
    pub permanent: bool,
}

/// What happened to one directory of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchEntry {
    /// The directory was removed.
    Deleted(DeleteResult),
    /// Removal failed; the directory may be partly deleted.
    Failed { path: PathBuf, error: String },
}

impl BatchEntry {
    /// Directory this entry is about.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Deleted(result) => &result.path,
            Self::Failed { path, .. } => path,
        }
    }

    /// Whether removal succeeded.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

/// Results of a batch removal, in the order the paths were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchDeleteResult {
    /// One entry per attempted directory.
    pub entries: Vec<BatchEntry>,
}

impl BatchDeleteResult {
    /// Number of successful removals.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_deleted()).count()
    }

    /// Number of failed removals.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.len() - self.success_count()
    }

    /// Check if all removals succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.entries.iter().all(BatchEntry::is_deleted)
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!("Deleted {} directory(ies)", self.success_count())
        } else {
            format!(
                "Deleted {} directory(ies), {} failed",
                self.success_count(),
                self.failure_count()
            )
        }
    }
}

/// Configuration for deletion operations.
#[derive(Debug, Clone)]
pub struct DeleteConfig {
    /// Use permanent deletion instead of trash.
    pub permanent: bool,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self { permanent: true }
    }
}

impl DeleteConfig {
    /// Create config for trash deletion.
    #[must_use]
    pub fn trash() -> Self {
        Self { permanent: false }
    }

    /// Create config for permanent deletion.
    #[must_use]
    pub fn permanent() -> Self {
        Self::default()
    }
}

/// Check that `path` is a real directory before touching it.
fn ensure_directory(path: &Path) -> Result<(), DeleteError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DeleteError::from_io(path, e))?;
    if metadata.is_dir() {
        Ok(())
    } else {
        Err(DeleteError::NotADirectory(path.to_path_buf()))
    }
}

/// Move a directory and everything in it to the system trash.
///
/// # Errors
///
/// - `NotFound` if the directory doesn't exist
/// - `NotADirectory` if the path is not a directory
/// - `TrashFailed` if the trash operation fails
pub fn trash_directory(path: &Path) -> Result<DeleteResult, DeleteError> {
    ensure_directory(path)?;

    trash::delete(path).map_err(|e| {
        log::error!("Trash operation failed for {}: {}", path.display(), e);
        DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Moved to trash: {}", path.display());
    Ok(DeleteResult {
        path: path.to_path_buf(),
        permanent: false,
    })
}

/// Permanently delete a directory and everything in it.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the directory doesn't exist
/// - `NotADirectory` if the path is not a directory
/// - `PermissionDenied` or `Io` if the recursive delete fails part way
pub fn permanent_delete_directory(path: &Path) -> Result<DeleteResult, DeleteError> {
    ensure_directory(path)?;

    fs::remove_dir_all(path).map_err(|e| {
        log::error!("Permanent delete failed for {}: {}", path.display(), e);
        DeleteError::from_io(path, e)
    })?;

    log::info!("Permanently deleted: {}", path.display());
    Ok(DeleteResult {
        path: path.to_path_buf(),
        permanent: true,
    })
}

/// Remove a directory according to `config`.
///
/// # Errors
///
/// See [`trash_directory`] and [`permanent_delete_directory`].
pub fn remove_directory(path: &Path, config: &DeleteConfig) -> Result<DeleteResult, DeleteError> {
    if config.permanent {
        permanent_delete_directory(path)
    } else {
        trash_directory(path)
    }
}

/// Remove multiple directories in order.
///
/// Every path is attempted; a failure is recorded and the batch moves on.
///
/// # Example
///
/// ```no_run
/// use dirdupe::actions::delete::{delete_batch, DeleteConfig};
/// use std::path::PathBuf;
///
/// let paths = vec![PathBuf::from("/data/copy1"), PathBuf::from("/data/copy2")];
/// let result = delete_batch(&paths, &DeleteConfig::permanent());
/// println!("{}", result.summary());
/// ```
pub fn delete_batch(paths: &[PathBuf], config: &DeleteConfig) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    for path in paths {
        let entry = match remove_directory(path, config) {
            Ok(deleted) => BatchEntry::Deleted(deleted),
            Err(e) => {
                log::warn!("Failed to delete {}: {}", e.path().display(), e);
                BatchEntry::Failed {
                    path: path.clone(),
                    error: e.to_string(),
                }
            }
        };
        result.entries.push(entry);
    }

    log::info!("{}", result.summary());
    result
}
