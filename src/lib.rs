//! dirdupe - Duplicate and overlapping directory resolver
//!
//! Compares the immediate subdirectories of a root by the names of the files
//! they contain, reports exact duplicates and partial overlaps, and can
//! delete duplicates or merge overlapping directories into one.
//!
//! The pipeline is strictly one-directional:
//! [`scanner`] → [`duplicates`] → [`actions`], with [`output`] rendering the
//! plain data each stage produces.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::actions::{delete_batch, execute_merges, plan_merges};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::analyze;
use crate::error::ExitCode;
use crate::output::{JsonOutput, Report, TextOutput};

/// Run the application with parsed CLI arguments, writing the report to stdout.
///
/// # Errors
///
/// Returns [`config::ConfigError`] (wrapped) if the root is invalid, or an
/// error if a directory cannot be read during analysis.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config = Config::from_cli(&cli)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run(&config, &mut handle)
}

/// Analyze `config.root`, perform the enabled actions and write the report.
///
/// # Errors
///
/// Returns an error if analysis fails or the report cannot be written.
/// Failed deletions and merges do not error; they yield
/// [`ExitCode::PartialSuccess`].
pub fn run<W: Write>(config: &Config, writer: &mut W) -> Result<ExitCode> {
    let analysis = analyze(&config.root)
        .with_context(|| format!("Failed to analyze {}", config.root.display()))?;
    log::info!(
        "Scanned {} directories under {}",
        analysis.directories_scanned,
        config.root.display()
    );

    let mut report = Report::from_analysis(&analysis);

    if config.remove_duplicates && analysis.classification.has_duplicates() {
        let paths: Vec<PathBuf> = analysis
            .duplicates()
            .iter()
            .map(|pair| pair.duplicate.path.clone())
            .collect();
        report = report.with_deletions(delete_batch(&paths, &config.delete_config()));
    }

    if config.merge && !analysis.overlaps.is_empty() {
        let plan = plan_merges(&analysis.overlaps);
        report = report.with_merges(execute_merges(&plan, &config.merge_config()));
    }

    if config.print_unique {
        report = report.with_unique(&analysis);
    }

    match config.output {
        OutputFormat::Text => TextOutput::new(&report)
            .with_color(config.color)
            .write_to(writer)?,
        OutputFormat::Json => JsonOutput::new(&report).write_to(writer)?,
    }
    writer.flush()?;

    if report.has_failures() {
        log::warn!("Completed with failed actions");
        Ok(ExitCode::PartialSuccess)
    } else {
        Ok(ExitCode::Success)
    }
}
