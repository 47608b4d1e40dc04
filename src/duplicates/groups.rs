//! Duplicate classification by signature.
//!
//! # Overview
//!
//! Directories with identical signatures form a duplicate group. Each group
//! has exactly one keeper, the record that sorts first under
//! [`canonical_cmp`]; every other member is recorded as a duplicate of that
//! keeper.
//!
//! # Example
//!
//! ```
//! use dirdupe::duplicates::classify;
//! use dirdupe::scanner::{DirectoryRecord, Signature};
//! use std::path::PathBuf;
//!
//! let sig = Signature::from_names(vec!["a.txt".into(), "b.txt".into()]);
//! let records = vec![
//!     DirectoryRecord::new(PathBuf::from("/root/Y"), sig.clone()),
//!     DirectoryRecord::new(PathBuf::from("/root/X"), sig),
//! ];
//!
//! let classification = classify(records);
//! assert_eq!(classification.keepers.len(), 1);
//! assert_eq!(classification.keepers[0].name, "X");
//! assert_eq!(classification.duplicates[0].duplicate.name, "Y");
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::scanner::{canonical_cmp, DirectoryRecord, Signature};

/// A directory whose signature matches a keeper's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatePair {
    /// The redundant directory
    pub duplicate: DirectoryRecord,
    /// The canonical directory it duplicates
    pub keeper: DirectoryRecord,
}

/// Result of classifying one root's directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// One keeper per distinct signature, in order of first appearance
    pub keepers: Vec<DirectoryRecord>,
    /// Duplicate → keeper pairs in discovery order
    pub duplicates: Vec<DuplicatePair>,
}

impl Classification {
    /// Number of duplicate groups with more than one member.
    #[must_use]
    pub fn group_count(&self) -> usize {
        let mut keepers: Vec<_> = self.duplicates.iter().map(|d| &d.keeper.path).collect();
        keepers.sort();
        keepers.dedup();
        keepers.len()
    }

    /// Whether any duplicates were found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Partition `records` into keepers and duplicates.
///
/// Records are sorted by [`canonical_cmp`] first, so the first record seen
/// with a signature is already the smallest of its group and stays its
/// keeper. The result does not depend on filesystem enumeration order. A
/// record listed twice is never its own duplicate.
#[must_use]
pub fn classify(mut records: Vec<DirectoryRecord>) -> Classification {
    records.sort_by(|a, b| canonical_cmp(&a.path, &b.path));

    let mut slot_by_signature: HashMap<Signature, usize> = HashMap::new();
    let mut keepers: Vec<DirectoryRecord> = Vec::new();
    let mut duplicates: Vec<DuplicatePair> = Vec::new();

    for record in records {
        let Some(slot) = slot_by_signature.get(&record.signature).copied() else {
            slot_by_signature.insert(record.signature.clone(), keepers.len());
            keepers.push(record);
            continue;
        };

        let keeper = &keepers[slot];
        if record.path == keeper.path {
            continue;
        }
        log::debug!("{} duplicates {}", record.name, keeper.name);
        duplicates.push(DuplicatePair {
            duplicate: record,
            keeper: keeper.clone(),
        });
    }

    log::info!(
        "Classified {} keeper(s) and {} duplicate(s)",
        keepers.len(),
        duplicates.len()
    );
    Classification {
        keepers,
        duplicates,
    }
}
