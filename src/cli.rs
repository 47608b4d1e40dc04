//! Command-line interface definitions for dirdupe.
//!
//! This module defines all CLI arguments using the clap derive API. Every
//! action is opt-in: without flags the tool only reports.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates and overlaps under the current directory
//! dirdupe
//!
//! # Delete duplicates and merge overlapping directories
//! dirdupe ~/Downloads/albums --remove --merge --print-unique
//!
//! # Merge, keeping both copies of conflicting files
//! dirdupe ~/Downloads/albums --merge --on-conflict rename
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::actions::ConflictPolicy;

/// Find duplicate and overlapping sibling directories.
///
/// Compares the immediate subdirectories of PATH by the names of the files
/// they contain. Directories with identical file-name sets are duplicates;
/// directories sharing only some names are partial conflicts.
#[derive(Debug, Parser)]
#[command(name = "dirdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory whose subdirectories are compared
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Delete duplicate directories after reporting them
    #[arg(long)]
    pub remove: bool,

    /// Merge directories with overlapping files after reporting them
    ///
    /// The directory whose name sorts first receives the other's files; the
    /// other directory is deleted afterwards.
    #[arg(long)]
    pub merge: bool,

    /// Print the directories that remain after removal and merging
    #[arg(long)]
    pub print_unique: bool,

    /// What to do with a source file whose name already exists in the target
    ///
    /// "skip" leaves the source copy behind, so it is deleted with the source.
    #[arg(long, value_enum, default_value = "skip", value_name = "POLICY")]
    pub on_conflict: ConflictPolicy,

    /// Move removed directories to the system trash instead of deleting them
    #[arg(long)]
    pub trash: bool,

    /// Output format (text for people, json for scripting)
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
