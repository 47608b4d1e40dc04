//! Duplicate and overlap detection module.
//!
//! This module provides functionality for:
//! - Signature-based duplicate classification with keeper selection
//! - Pairwise overlap detection between keepers
//! - The read-only analysis pipeline tying both together

pub mod finder;
pub mod groups;
pub mod overlap;

// Re-export main types
pub use finder::{analyze, Analysis};
pub use groups::{classify, Classification, DuplicatePair};
pub use overlap::{detect_overlaps, OverlapPair};
