//! One-level listing of a root directory.
//!
//! Only the immediate children of the root are looked at. Each child that is
//! a directory (by its own entry type, so symlinked directories are ignored)
//! becomes a [`DirectoryRecord`] carrying its signature.

use std::fs;
use std::path::Path;

use super::{canonical_cmp, DirectoryRecord, ScanError};

/// List the immediate child directories of `root` with their signatures.
///
/// Non-directory entries are ignored. Hidden directories are included. The
/// result is sorted by [`canonical_cmp`].
///
/// # Errors
///
/// Returns [`ScanError`] if the root or any child directory cannot be
/// listed. A partial listing is never returned.
///
/// # Example
///
/// ```no_run
/// use dirdupe::scanner::list_directories;
/// use std::path::Path;
///
/// let records = list_directories(Path::new("/data/downloads")).unwrap();
/// println!("{} directories", records.len());
/// ```
pub fn list_directories(root: &Path) -> Result<Vec<DirectoryRecord>, ScanError> {
    let entries = fs::read_dir(root).map_err(|e| ScanError::from_io(root, e))?;

    let mut records = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::from_io(root, e))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| ScanError::from_io(&path, e))?;

        if !file_type.is_dir() {
            log::trace!("Ignoring non-directory entry {}", path.display());
            continue;
        }

        let record = DirectoryRecord::from_path(&path)?;
        log::debug!(
            "Found directory {} with {} file(s)",
            record.name,
            record.signature.len()
        );
        log::trace!("Files in {}: {:?}", record.name, record.signature.names());
        records.push(record);
    }

    records.sort_by(|a, b| canonical_cmp(&a.path, &b.path));
    log::debug!("Listed {} directories under {}", records.len(), root.display());
    Ok(records)
}
