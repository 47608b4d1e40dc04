//! Partial overlap detection between keepers.
//!
//! Two keepers overlap when their file-name sets share at least one name but
//! are not identical. Strict subsets are reported too, since only exact
//! signature equality counts as duplication.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::scanner::DirectoryRecord;

/// Two keepers sharing some, but not all, file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapPair {
    /// Keeper that appeared first in the keeper list
    pub first: DirectoryRecord,
    /// Keeper that appeared second
    pub second: DirectoryRecord,
    /// Names present in both directories, sorted
    pub common: BTreeSet<String>,
}

impl OverlapPair {
    /// Whether one side's files are entirely contained in the other's.
    #[must_use]
    pub fn is_subset(&self) -> bool {
        self.common.len() == self.first.signature.len()
            || self.common.len() == self.second.signature.len()
    }
}

/// Find every overlapping pair among `keepers`.
///
/// Pairs are produced for `i < j` in keeper order. The comparison is
/// quadratic, which is fine for the immediate children of one root.
#[must_use]
pub fn detect_overlaps(keepers: &[DirectoryRecord]) -> Vec<OverlapPair> {
    let name_sets: Vec<BTreeSet<&str>> = keepers.iter().map(DirectoryRecord::file_names).collect();

    let mut overlaps = Vec::new();
    for (i, first) in keepers.iter().enumerate() {
        for (j, second) in keepers.iter().enumerate().skip(i + 1) {
            if name_sets[i] == name_sets[j] {
                continue;
            }

            let common: BTreeSet<String> = name_sets[i]
                .intersection(&name_sets[j])
                .map(|name| (*name).to_string())
                .collect();
            if common.is_empty() {
                continue;
            }

            log::debug!(
                "{} and {} share {} file(s)",
                first.name,
                second.name,
                common.len()
            );
            overlaps.push(OverlapPair {
                first: first.clone(),
                second: second.clone(),
                common,
            });
        }
    }
    overlaps
}
