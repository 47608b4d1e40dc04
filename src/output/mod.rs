//! Report data and output formatters.
//!
//! The analysis and the actions produce plain data; this module gathers it
//! into a [`Report`] and renders it:
//! - [`TextOutput`] for people, in a fixed section order
//! - [`JsonOutput`] for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dirdupe::duplicates::analyze;
//! use dirdupe::output::{Report, TextOutput};
//! use std::path::Path;
//!
//! let analysis = analyze(Path::new(".")).unwrap();
//! let report = Report::from_analysis(&analysis);
//! TextOutput::new(&report).write_to(&mut std::io::stdout()).unwrap();
//! ```

pub mod json;
pub mod text;

use std::collections::HashSet;
use std::path::PathBuf;

use crate::actions::{BatchDeleteResult, MergeResult};
use crate::duplicates::{Analysis, DuplicatePair, OverlapPair};

// Re-export main types
pub use json::JsonOutput;
pub use text::TextOutput;

/// Everything one run found and did.
#[derive(Debug, Clone)]
pub struct Report {
    /// Analyzed root
    pub root: PathBuf,
    /// Duplicate → keeper pairs
    pub duplicates: Vec<DuplicatePair>,
    /// Number of keepers with at least one duplicate
    pub group_count: usize,
    /// Duplicate removal results, when removal was requested
    pub deletions: Option<BatchDeleteResult>,
    /// Overlapping keeper pairs
    pub conflicts: Vec<OverlapPair>,
    /// Merge results, when merging was requested
    pub merges: Option<Vec<MergeResult>>,
    /// Surviving directories, when requested
    pub unique: Option<Vec<PathBuf>>,
}

impl Report {
    /// A report of findings only, with no actions recorded.
    #[must_use]
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            root: analysis.root.clone(),
            duplicates: analysis.duplicates().to_vec(),
            group_count: analysis.classification.group_count(),
            deletions: None,
            conflicts: analysis.overlaps.clone(),
            merges: None,
            unique: None,
        }
    }

    /// Record duplicate removal results.
    #[must_use]
    pub fn with_deletions(mut self, deletions: BatchDeleteResult) -> Self {
        self.deletions = Some(deletions);
        self
    }

    /// Record merge results.
    #[must_use]
    pub fn with_merges(mut self, merges: Vec<MergeResult>) -> Self {
        self.merges = Some(merges);
        self
    }

    /// Record the surviving directories: the keepers minus any source whose
    /// files were merged away, including one whose deletion then failed.
    #[must_use]
    pub fn with_unique(mut self, analysis: &Analysis) -> Self {
        let removed: HashSet<&PathBuf> = self
            .merges
            .iter()
            .flatten()
            .filter(|m| m.consumed_source())
            .map(|m| &m.source)
            .collect();

        let unique = analysis
            .keepers()
            .iter()
            .map(|k| &k.path)
            .filter(|p| !removed.contains(p))
            .cloned()
            .collect();
        self.unique = Some(unique);
        self
    }

    /// Whether any requested action failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        let delete_failed = self
            .deletions
            .as_ref()
            .is_some_and(|d| !d.all_succeeded());
        let merge_failed = self
            .merges
            .iter()
            .flatten()
            .any(MergeResult::is_failure);
        delete_failed || merge_failed
    }
}
