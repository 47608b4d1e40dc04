//! Filesystem actions module.
//!
//! This module provides functionality for:
//! - Removing duplicate directories (permanently or to the system trash)
//! - Merging overlapping directories into a canonical target
//!
//! # Deletion
//!
//! ```no_run
//! use dirdupe::actions::delete::{remove_directory, DeleteConfig};
//! use std::path::Path;
//!
//! let result = remove_directory(Path::new("/data/copy"), &DeleteConfig::trash());
//! ```
//!
//! # Merging
//!
//! Files are moved from source to target unless the name is taken; what
//! happens on a collision is set by [`ConflictPolicy`]. The source is
//! deleted afterwards.
//!
//! ```no_run
//! use dirdupe::actions::merge::{merge_directory, ConflictPolicy, MergeConfig};
//! use std::path::Path;
//!
//! let config = MergeConfig::default().with_conflict_policy(ConflictPolicy::Rename);
//! let outcome = merge_directory(Path::new("/data/Y"), Path::new("/data/X"), &config);
//! ```

pub mod delete;
pub mod merge;

// Re-export commonly used types
pub use delete::{
    delete_batch, permanent_delete_directory, remove_directory, trash_directory,
    BatchDeleteResult, BatchEntry, DeleteConfig, DeleteError, DeleteResult,
};

pub use merge::{
    execute_merges, merge_directory, plan_merges, ConflictPolicy, MergeAssignment, MergeConfig,
    MergeError, MergeOutcome, MergeResult, MergeStatus,
};
