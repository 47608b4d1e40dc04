//! Directory analysis pipeline.
//!
//! # Overview
//!
//! This module runs the read-only stages for one root:
//! 1. **Listing**: collect the root's child directories and their signatures
//! 2. **Classification**: group equal signatures and pick keepers
//! 3. **Overlap detection**: compare keepers pairwise
//!
//! Nothing here mutates the filesystem; deletion and merging live in
//! [`crate::actions`].
//!
//! # Example
//!
//! ```no_run
//! use dirdupe::duplicates::analyze;
//! use std::path::Path;
//!
//! let analysis = analyze(Path::new("/data/downloads")).unwrap();
//! for pair in &analysis.classification.duplicates {
//!     println!("{} -> {}", pair.duplicate.name, pair.keeper.name);
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::groups::{classify, Classification, DuplicatePair};
use super::overlap::{detect_overlaps, OverlapPair};
use crate::scanner::{list_directories, DirectoryRecord, ScanError};

/// Findings for one root directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// The analyzed root
    pub root: PathBuf,
    /// Number of child directories examined
    pub directories_scanned: usize,
    /// Keepers and duplicates
    pub classification: Classification,
    /// Overlapping keeper pairs, computed once before any merge
    pub overlaps: Vec<OverlapPair>,
}

impl Analysis {
    /// Build an analysis from already listed records.
    #[must_use]
    pub fn from_records(root: PathBuf, records: Vec<DirectoryRecord>) -> Self {
        let directories_scanned = records.len();
        let classification = classify(records);
        let overlaps = detect_overlaps(&classification.keepers);
        log::info!(
            "Found {} overlapping pair(s) among {} keeper(s)",
            overlaps.len(),
            classification.keepers.len()
        );
        Self {
            root,
            directories_scanned,
            classification,
            overlaps,
        }
    }

    /// Duplicate → keeper pairs.
    #[must_use]
    pub fn duplicates(&self) -> &[DuplicatePair] {
        &self.classification.duplicates
    }

    /// Surviving unique directories.
    #[must_use]
    pub fn keepers(&self) -> &[DirectoryRecord] {
        &self.classification.keepers
    }
}

/// Analyze the immediate child directories of `root`.
///
/// # Errors
///
/// Returns [`ScanError`] if the root or any child directory cannot be read.
/// No partial analysis is returned.
pub fn analyze(root: &Path) -> Result<Analysis, ScanError> {
    log::info!("Analyzing {}", root.display());
    let records = list_directories(root)
        .inspect_err(|e| log::error!("Cannot read {}: {}", e.path().display(), e))?;
    Ok(Analysis::from_records(root.to_path_buf(), records))
}
