//! Directory signature extraction.
//!
//! A signature is the sorted list of names of a directory's immediate,
//! non-hidden, regular files. Two directories with equal signatures are
//! treated as duplicates; file contents are never read.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Serialize;

use super::ScanError;

/// Sorted file names of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Signature(Vec<String>);

impl Signature {
    /// Build a signature from names in any order.
    #[must_use]
    pub fn from_names(mut names: Vec<String>) -> Self {
        names.sort_unstable();
        Self(names)
    }

    /// Names in code point order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Names as a set, for intersection with another directory.
    #[must_use]
    pub fn name_set(&self) -> BTreeSet<&str> {
        self.0.iter().map(String::as_str).collect()
    }

    /// Number of files in the signature.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the directory had no qualifying files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether a file name is hidden (starts with `.`).
#[must_use]
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Compute the signature of the directory at `path`.
///
/// Only regular files count. The entry's own type decides this, so symbolic
/// links (even to files) and subdirectories are left out.
///
/// # Errors
///
/// Returns [`ScanError`] naming `path` if it cannot be listed.
///
/// # Example
///
/// ```no_run
/// use dirdupe::scanner::directory_signature;
/// use std::path::Path;
///
/// let sig = directory_signature(Path::new("photos")).unwrap();
/// println!("{:?}", sig.names());
/// ```
pub fn directory_signature(path: &Path) -> Result<Signature, ScanError> {
    let entries = fs::read_dir(path).map_err(|e| ScanError::from_io(path, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::from_io(path, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| ScanError::from_io(&entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if is_hidden_name(&name) {
            log::trace!("Skipping hidden file {}", entry.path().display());
            continue;
        }
        names.push(name);
    }

    log::trace!("Signature of {}: {} file(s)", path.display(), names.len());
    Ok(Signature::from_names(names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_signature_is_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let sig = directory_signature(dir.path()).unwrap();
        assert_eq!(sig.names(), ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_signature_skips_hidden_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".DS_Store"), b"junk").unwrap();
        fs::write(dir.path().join("keep.txt"), b"x").unwrap();

        let sig = directory_signature(dir.path()).unwrap();
        assert_eq!(sig.names(), ["keep.txt"]);
    }

    #[test]
    fn test_signature_skips_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();
        fs::write(dir.path().join("real.txt"), b"x").unwrap();

        let sig = directory_signature(dir.path()).unwrap();
        assert_eq!(sig.names(), ["real.txt"]);
    }

    #[test]
    fn test_signature_includes_empty_and_extensionless_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README"), b"").unwrap();
        fs::write(dir.path().join("weird name (1).tar.gz"), b"").unwrap();

        let sig = directory_signature(dir.path()).unwrap();
        assert_eq!(sig.names(), ["README", "weird name (1).tar.gz"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_signature_skips_symlinks() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("target.txt");
        fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).unwrap();

        let sig = directory_signature(dir.path()).unwrap();
        assert_eq!(sig.names(), ["target.txt"]);
    }

    #[test]
    fn test_signature_of_empty_directory() {
        let dir = TempDir::new().unwrap();
        let sig = directory_signature(dir.path()).unwrap();
        assert!(sig.is_empty());
        assert_eq!(sig, Signature::default());
    }

    #[test]
    fn test_signature_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let err = directory_signature(&missing).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
        assert_eq!(err.path(), missing.as_path());
    }

    #[test]
    fn test_is_hidden_name() {
        assert!(is_hidden_name(".hidden"));
        assert!(is_hidden_name("."));
        assert!(!is_hidden_name("visible.txt"));
        assert!(!is_hidden_name("a.b"));
    }

    #[test]
    fn test_from_names_equality_ignores_input_order() {
        let a = Signature::from_names(vec!["x".into(), "y".into()]);
        let b = Signature::from_names(vec!["y".into(), "x".into()]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }
}
