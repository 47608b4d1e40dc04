//! JSON output formatter for run reports.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/data/albums",
//!   "duplicates": [{ "duplicate": "/data/albums/Y", "keeper": "/data/albums/X" }],
//!   "deletions": null,
//!   "conflicts": [
//!     {
//!       "first": "/data/albums/X",
//!       "second": "/data/albums/Z",
//!       "common": ["b.txt"],
//!       "subset": false
//!     }
//!   ],
//!   "merges": null,
//!   "unique": null,
//!   "summary": {
//!     "duplicate_count": 1,
//!     "group_count": 1,
//!     "conflict_count": 1,
//!     "failed_actions": 0
//!   }
//! }
//! ```

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::Report;
use crate::actions::{BatchDeleteResult, MergeResult};

/// One duplicate → keeper pair.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicate {
    /// Path of the redundant directory
    pub duplicate: String,
    /// Path of the directory kept
    pub keeper: String,
}

/// One partial conflict.
#[derive(Debug, Clone, Serialize)]
pub struct JsonConflict {
    /// First keeper
    pub first: String,
    /// Second keeper
    pub second: String,
    /// Sorted names present in both
    pub common: Vec<String>,
    /// Whether one side's files are all contained in the other's
    pub subset: bool,
}

/// Summary counts.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Number of duplicate directories found
    pub duplicate_count: usize,
    /// Number of keepers that have at least one duplicate
    pub group_count: usize,
    /// Number of partial conflicts found
    pub conflict_count: usize,
    /// Number of deletions or merges that failed
    pub failed_actions: usize,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Analyzed root
    pub root: String,
    /// Duplicate pairs
    pub duplicates: Vec<JsonDuplicate>,
    /// Removal results, if removal was requested
    pub deletions: Option<&'a BatchDeleteResult>,
    /// Partial conflicts
    pub conflicts: Vec<JsonConflict>,
    /// Merge results, if merging was requested
    pub merges: Option<&'a [MergeResult]>,
    /// Surviving directories, if requested
    pub unique: Option<Vec<String>>,
    /// Summary counts
    pub summary: JsonSummary,
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl<'a> JsonOutput<'a> {
    /// Create a JSON view of `report`.
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        let failed_deletions = report
            .deletions
            .as_ref()
            .map_or(0, BatchDeleteResult::failure_count);
        let failed_merges = report
            .merges
            .iter()
            .flatten()
            .filter(|m| m.is_failure())
            .count();

        Self {
            root: path_string(&report.root),
            duplicates: report
                .duplicates
                .iter()
                .map(|d| JsonDuplicate {
                    duplicate: path_string(&d.duplicate.path),
                    keeper: path_string(&d.keeper.path),
                })
                .collect(),
            deletions: report.deletions.as_ref(),
            conflicts: report
                .conflicts
                .iter()
                .map(|c| JsonConflict {
                    first: path_string(&c.first.path),
                    second: path_string(&c.second.path),
                    common: c.common.iter().cloned().collect(),
                    subset: c.is_subset(),
                })
                .collect(),
            merges: report.merges.as_deref(),
            unique: report
                .unique
                .as_ref()
                .map(|paths| paths.iter().map(|p| path_string(p)).collect()),
            summary: JsonSummary {
                duplicate_count: report.duplicates.len(),
                group_count: report.group_count,
                conflict_count: report.conflicts.len(),
                failed_actions: failed_deletions + failed_merges,
            },
        }
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)
    }
}
