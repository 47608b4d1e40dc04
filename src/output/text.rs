//! Human-readable text report.
//!
//! Sections are always written in this order:
//! 1. Header naming the analyzed root
//! 2. Duplicate directories (`<duplicate> -> <keeper>`)
//! 3. Removal log, when removal was requested and duplicates exist
//! 4. Partial file conflicts (`<a> vs <b>` with the common file names)
//! 5. Merge log, when merging was requested and conflicts exist
//! 6. Surviving directories, when requested
//! 7. Completion line

use std::io::{self, Write};

use yansi::{Paint, Style};

use super::Report;
use crate::actions::{BatchEntry, MergeResult, MergeStatus};
use crate::scanner::display_name;

const RULE: &str = "-------------------------------------------";

const HEADING: Style = Style::new().bold();
const WARNING: Style = Style::new().yellow().bold();
const FAILURE: Style = Style::new().red().bold();

/// Formatter for the text report.
pub struct TextOutput<'a> {
    report: &'a Report,
    color: bool,
}

impl<'a> TextOutput<'a> {
    /// Create a new text formatter without colors.
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self {
            report,
            color: false,
        }
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.paint(style).to_string()
        } else {
            text.to_string()
        }
    }

    /// Write the full report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let report = self.report;

        writeln!(writer)?;
        writeln!(
            writer,
            "{} {}",
            self.paint("Analyzing directory structure of:", HEADING),
            report.root.display()
        )?;
        writeln!(writer, "{RULE}")?;

        self.write_duplicates(writer)?;
        self.write_conflicts(writer)?;
        if let Some(merges) = report.merges.as_ref().filter(|m| !m.is_empty()) {
            self.write_merges(writer, merges)?;
        }
        if let Some(unique) = &report.unique {
            writeln!(writer)?;
            writeln!(
                writer,
                "{}",
                self.paint("Keeping these unique directories:", HEADING)
            )?;
            for path in unique {
                writeln!(writer, "  {}", display_name(path))?;
            }
        }

        writeln!(writer)?;
        writeln!(writer, "Operation complete")?;
        Ok(())
    }

    fn write_duplicates<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let report = self.report;

        writeln!(writer)?;
        writeln!(writer, "{}", self.paint("Duplicate directories:", HEADING))?;
        if report.duplicates.is_empty() {
            writeln!(writer, "  (none found)")?;
            return Ok(());
        }
        for pair in &report.duplicates {
            writeln!(writer, "  {} -> {}", pair.duplicate.name, pair.keeper.name)?;
        }

        if let Some(deletions) = &report.deletions {
            writeln!(writer)?;
            writeln!(
                writer,
                "{}",
                self.paint("Removing duplicate directories:", HEADING)
            )?;
            for entry in &deletions.entries {
                let path = entry.path().display();
                match entry {
                    BatchEntry::Deleted(_) => writeln!(writer, "  Deleting {path}")?,
                    BatchEntry::Failed { error, .. } => writeln!(
                        writer,
                        "  {} {path}: {error}",
                        self.paint("FAILED", FAILURE)
                    )?,
                }
            }
        }
        Ok(())
    }

    fn write_conflicts<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.paint("Directories with partial file conflicts:", HEADING)
        )?;
        if self.report.conflicts.is_empty() {
            writeln!(writer, "  (none found)")?;
            return Ok(());
        }
        for pair in &self.report.conflicts {
            writeln!(writer)?;
            writeln!(
                writer,
                "  {} {} vs {}",
                self.paint("WARNING:", WARNING),
                pair.first.name,
                pair.second.name
            )?;
            writeln!(writer, "  Common files ({}):", pair.common.len())?;
            for name in &pair.common {
                writeln!(writer, "    - {name}")?;
            }
        }
        Ok(())
    }

    fn write_merges<W: Write>(&self, writer: &mut W, merges: &[MergeResult]) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.paint("Merging directories with overlapping files:", HEADING)
        )?;
        for merge in merges {
            let source = display_name(&merge.source);
            let target = display_name(&merge.target);
            match &merge.status {
                MergeStatus::Merged(outcome) => {
                    writeln!(writer, "  Merging {source} into {target}")?;
                    for (from, to) in &outcome.renamed {
                        writeln!(writer, "    renamed {from} -> {to}")?;
                    }
                    for (name, error) in &outcome.failed {
                        writeln!(
                            writer,
                            "    {} to move {name}: {error}",
                            self.paint("FAILED", FAILURE)
                        )?;
                    }
                    writeln!(writer, "  Deleting {source}")?;
                }
                MergeStatus::Aborted(outcome) => {
                    writeln!(writer, "  Merging {source} into {target}")?;
                    writeln!(
                        writer,
                        "  {} on conflicting file {}, keeping {source}",
                        self.paint("Aborted", WARNING),
                        outcome.aborted_on.as_deref().unwrap_or_default()
                    )?;
                }
                MergeStatus::SourceAlreadyMerged { into } => {
                    writeln!(
                        writer,
                        "  Skipping {source} into {target}: already merged into {}",
                        display_name(into)
                    )?;
                }
                MergeStatus::TargetAlreadyMerged { into } => {
                    writeln!(
                        writer,
                        "  Skipping {source} into {target}: {target} was merged into {}",
                        display_name(into)
                    )?;
                }
                MergeStatus::Failed { error, .. } => {
                    writeln!(writer, "  Merging {source} into {target}")?;
                    writeln!(writer, "  {} {error}", self.paint("FAILED", FAILURE))?;
                }
            }
        }
        Ok(())
    }
}
