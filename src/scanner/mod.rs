//! Scanner module for directory listing and signature extraction.
//!
//! This module provides functionality for:
//! - Listing the immediate child directories of a root
//! - Computing the file-name signature of one directory
//! - The canonical ordering shared by keeper selection and merge planning
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`signature`]: Signature extraction for a single directory
//! - [`walker`]: One-level listing of the root into [`DirectoryRecord`]s
//!
//! # Example
//!
//! ```no_run
//! use dirdupe::scanner::list_directories;
//! use std::path::Path;
//!
//! for record in list_directories(Path::new(".")).unwrap() {
//!     println!("{}: {} file(s)", record.name, record.signature.len());
//! }
//! ```

pub mod signature;
pub mod walker;

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

// Re-export main types
pub use signature::{directory_signature, is_hidden_name, Signature};
pub use walker::list_directories;

/// One immediate child directory of the analyzed root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryRecord {
    /// Full path to the directory
    pub path: PathBuf,
    /// Final path component, used for display and ordering
    pub name: String,
    /// Sorted names of the directory's visible regular files
    pub signature: Signature,
}

impl DirectoryRecord {
    /// Create a record for `path` with an already extracted signature.
    #[must_use]
    pub fn new(path: PathBuf, signature: Signature) -> Self {
        let name = display_name(&path);
        Self {
            path,
            name,
            signature,
        }
    }

    /// Read `path` and build its record.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the directory cannot be listed.
    pub fn from_path(path: &Path) -> Result<Self, ScanError> {
        let signature = directory_signature(path)?;
        Ok(Self::new(path.to_path_buf(), signature))
    }

    /// The file-name set derived from the signature.
    #[must_use]
    pub fn file_names(&self) -> BTreeSet<&str> {
        self.signature.name_set()
    }
}

/// Canonical order of two directories.
///
/// Compares the final path component by code point order and falls back to
/// the full path when the names are equal. Keeper selection and merge
/// target/source assignment both go through this function.
#[must_use]
pub fn canonical_cmp(a: &Path, b: &Path) -> Ordering {
    display_name(a)
        .cmp(&display_name(b))
        .then_with(|| a.as_os_str().cmp(b.as_os_str()))
}

/// Final path component as a string, or the whole path when there is none.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
        .into_owned()
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while listing a directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotADirectory => Self::NotADirectory(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::Io { path: p, .. } => p,
        }
    }
}
