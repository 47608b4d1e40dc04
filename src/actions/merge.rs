//! Merging of overlapping directories.
//!
//! # Overview
//!
//! For every overlapping pair of keepers, the directory that sorts first
//! under [`canonical_cmp`] becomes the *target* and the other the *source*.
//! Regular files from the source are moved into the target unless a
//! same-named entry already exists there; the source is then deleted along
//! with anything left inside it.
//!
//! What happens on a name collision is governed by [`ConflictPolicy`]. The
//! default, [`ConflictPolicy::Skip`], leaves the source's copy behind, so it
//! is lost when the source is deleted.
//!
//! Overlaps are never recomputed after a merge: if merging `Y` into `X`
//! makes `X` overlap a third directory, that is not detected in the same run.
//!
//! # Example
//!
//! ```no_run
//! use dirdupe::actions::merge::{execute_merges, plan_merges, MergeConfig};
//! use dirdupe::duplicates::analyze;
//! use std::path::Path;
//!
//! let analysis = analyze(Path::new("/data/downloads")).unwrap();
//! let plan = plan_merges(&analysis.overlaps);
//! for result in execute_merges(&plan, &MergeConfig::default()) {
//!     println!("{:?}", result.status);
//! }
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::delete::{remove_directory, DeleteConfig, DeleteError};
use crate::duplicates::OverlapPair;
use crate::scanner::canonical_cmp;

/// What to do when a source file's name already exists in the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Leave the source copy behind; it is deleted with the source.
    #[default]
    Skip,
    /// Move it under the first free `<stem>_<n><.ext>` name (photo.jpg -> photo_1.jpg).
    Rename,
    /// Stop merging this pair and keep the source directory.
    Abort,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Rename => write!(f, "rename"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

/// Configuration for merge operations.
#[derive(Debug, Clone, Default)]
pub struct MergeConfig {
    /// Name collision handling.
    pub on_conflict: ConflictPolicy,
    /// How merged-away sources are removed.
    pub delete: DeleteConfig,
}

impl MergeConfig {
    /// Set the conflict policy.
    #[must_use]
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.on_conflict = policy;
        self
    }

    /// Set how sources are removed after merging.
    #[must_use]
    pub fn with_delete_config(mut self, delete: DeleteConfig) -> Self {
        self.delete = delete;
        self
    }
}

/// One target and the sources that will be merged into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeAssignment {
    /// Directory receiving files
    pub target: PathBuf,
    /// Directories donating files, in discovery order
    pub sources: Vec<PathBuf>,
}

/// Per-file record of one source → target merge.
///
/// File names are kept as display strings; names that are not valid UTF-8
/// appear lossily converted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Directory files were taken from
    pub source: PathBuf,
    /// Directory files were moved into
    pub target: PathBuf,
    /// Files moved under their own name
    pub moved: Vec<String>,
    /// Files moved under a new name, as `(original, new)`
    pub renamed: Vec<(String, String)>,
    /// Files not moved because the name was taken in the target
    pub left_behind: Vec<String>,
    /// Files that failed to move, with the error
    pub failed: Vec<(String, String)>,
    /// Name that stopped the merge under [`ConflictPolicy::Abort`]
    pub aborted_on: Option<String>,
    /// Whether the source directory was deleted afterwards
    pub source_removed: bool,
}

impl MergeOutcome {
    fn new(source: &Path, target: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
            ..Self::default()
        }
    }

    /// Whether every file was handled without an I/O failure.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Error type for a single source → target merge.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The source directory could not be listed; nothing was moved.
    #[error("cannot read source directory {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The target directory is missing or not a directory.
    #[error("merge target is not a directory: {0}")]
    TargetMissing(PathBuf),

    /// Files were processed but the source directory could not be deleted.
    #[error("failed to delete source after merge: {source}")]
    RemoveSource {
        /// What was done before the deletion failed
        outcome: Box<MergeOutcome>,
        #[source]
        source: DeleteError,
    },
}

/// Final state of one planned source → target pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MergeStatus {
    /// Files processed and the source removed.
    Merged(MergeOutcome),
    /// Stopped at a name collision; the source was kept.
    Aborted(MergeOutcome),
    /// The source had already been merged into another target this run.
    SourceAlreadyMerged { into: PathBuf },
    /// The target had already been merged into another directory this run.
    TargetAlreadyMerged { into: PathBuf },
    /// The merge failed; `outcome` holds any partial progress.
    Failed {
        error: String,
        outcome: Option<MergeOutcome>,
    },
}

/// Result of one planned source → target pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeResult {
    /// Directory donating files
    pub source: PathBuf,
    /// Directory receiving files
    pub target: PathBuf,
    /// What happened
    pub status: MergeStatus,
}

impl MergeResult {
    /// Whether this pair ended in an error.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        match &self.status {
            MergeStatus::Failed { .. } => true,
            MergeStatus::Merged(outcome) => !outcome.is_clean(),
            _ => false,
        }
    }

    /// Whether the source's files went into the target, so the source no
    /// longer stands on its own even if deleting it failed.
    #[must_use]
    pub fn consumed_source(&self) -> bool {
        match &self.status {
            MergeStatus::Merged(outcome) => outcome.source_removed,
            MergeStatus::Failed { outcome, .. } => outcome.is_some(),
            _ => false,
        }
    }
}

/// Assign target and source for every overlap pair.
///
/// The canonically smaller directory is the target. Sources are grouped
/// under their target, with targets in order of first appearance.
#[must_use]
pub fn plan_merges(overlaps: &[OverlapPair]) -> Vec<MergeAssignment> {
    let mut plan: Vec<MergeAssignment> = Vec::new();

    for pair in overlaps {
        let (target, source) = match canonical_cmp(&pair.first.path, &pair.second.path) {
            Ordering::Greater => (&pair.second.path, &pair.first.path),
            _ => (&pair.first.path, &pair.second.path),
        };

        match plan.iter_mut().find(|a| &a.target == target) {
            Some(assignment) => assignment.sources.push(source.clone()),
            None => plan.push(MergeAssignment {
                target: target.clone(),
                sources: vec![source.clone()],
            }),
        }
    }
    plan
}

/// Candidate name for the `n`th rename of `name`: `photo.jpg` → `photo_1.jpg`.
///
/// Works on raw OS names, so bytes that are not valid UTF-8 survive.
#[must_use]
pub fn renamed_file_name(name: &OsStr, n: usize) -> OsString {
    let path = Path::new(name);
    let mut renamed = path.file_stem().unwrap_or(name).to_os_string();
    renamed.push(format!("_{n}"));
    if let Some(ext) = path.extension() {
        renamed.push(".");
        renamed.push(ext);
    }
    renamed
}

fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn free_renamed_path(target: &Path, name: &OsStr) -> (OsString, PathBuf) {
    let mut n = 1;
    loop {
        let candidate = renamed_file_name(name, n);
        let path = target.join(&candidate);
        if !entry_exists(&path) {
            return (candidate, path);
        }
        n += 1;
    }
}

fn lossy(name: &OsStr) -> String {
    name.to_string_lossy().into_owned()
}

/// Move one file, copying across devices when a rename is not possible.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!("Cross-device move, copying {}", from.display());
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

/// Regular files directly inside `dir`, sorted by name.
fn regular_files(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name());
        }
    }
    names.sort_unstable();
    Ok(names)
}

/// Move each of `names` from `source` into `target`, recording what
/// happened in `outcome`.
///
/// A failed move is recorded and the next name is tried. Under
/// [`ConflictPolicy::Abort`] the first collision sets `aborted_on` and
/// stops.
fn move_files(
    source: &Path,
    target: &Path,
    names: &[OsString],
    policy: ConflictPolicy,
    outcome: &mut MergeOutcome,
) {
    for name in names {
        let from = source.join(name);
        let dest = target.join(name);

        let (new_name, dest) = if !entry_exists(&dest) {
            (None, dest)
        } else {
            match policy {
                ConflictPolicy::Skip => {
                    log::warn!(
                        "{} already exists in {}, leaving source copy behind",
                        name.to_string_lossy(),
                        target.display()
                    );
                    outcome.left_behind.push(lossy(name));
                    continue;
                }
                ConflictPolicy::Rename => {
                    let (candidate, path) = free_renamed_path(target, name);
                    (Some(candidate), path)
                }
                ConflictPolicy::Abort => {
                    log::warn!(
                        "{} already exists in {}, aborting merge of {}",
                        name.to_string_lossy(),
                        target.display(),
                        source.display()
                    );
                    outcome.aborted_on = Some(lossy(name));
                    return;
                }
            }
        };

        match move_file(&from, &dest) {
            Ok(()) => {
                log::debug!("Moved {} to {}", from.display(), dest.display());
                match new_name {
                    Some(new_name) => outcome.renamed.push((lossy(name), lossy(&new_name))),
                    None => outcome.moved.push(lossy(name)),
                }
            }
            Err(e) => {
                log::warn!("Failed to move {}: {}", from.display(), e);
                outcome.failed.push((lossy(name), e.to_string()));
            }
        }
    }
}

/// Merge `source` into `target`, then delete `source`.
///
/// A failure moving one file is logged and recorded; the remaining files are
/// still processed. Under [`ConflictPolicy::Abort`] the first collision stops
/// the merge and the source is kept.
///
/// # Errors
///
/// - `TargetMissing` if `target` is not a directory
/// - `ReadSource` if `source` cannot be listed
/// - `RemoveSource` if deleting `source` fails after the files were handled
pub fn merge_directory(
    source: &Path,
    target: &Path,
    config: &MergeConfig,
) -> Result<MergeOutcome, MergeError> {
    if !fs::symlink_metadata(target).is_ok_and(|m| m.is_dir()) {
        return Err(MergeError::TargetMissing(target.to_path_buf()));
    }

    let names = regular_files(source).map_err(|e| MergeError::ReadSource {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut outcome = MergeOutcome::new(source, target);
    move_files(source, target, &names, config.on_conflict, &mut outcome);
    if outcome.aborted_on.is_some() {
        return Ok(outcome);
    }

    if let Err(e) = remove_directory(source, &config.delete) {
        return Err(MergeError::RemoveSource {
            outcome: Box::new(outcome),
            source: e,
        });
    }
    outcome.source_removed = true;
    Ok(outcome)
}

/// Apply a merge plan, one pair at a time.
///
/// Each pair is independent of the others' outcome. A directory consumed as
/// a source earlier in the run is not touched again, whether it shows up as
/// a later source or a later target. A source whose files were moved but
/// whose deletion failed counts as consumed too.
#[must_use]
pub fn execute_merges(plan: &[MergeAssignment], config: &MergeConfig) -> Vec<MergeResult> {
    let mut merged_into: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut results = Vec::new();

    for assignment in plan {
        let target = &assignment.target;
        for source in &assignment.sources {
            let status = if let Some(into) = merged_into.get(target) {
                log::warn!(
                    "Skipping {} into {}: target was already merged into {}",
                    source.display(),
                    target.display(),
                    into.display()
                );
                MergeStatus::TargetAlreadyMerged { into: into.clone() }
            } else if let Some(into) = merged_into.get(source) {
                log::info!(
                    "Skipping {} into {}: already merged into {}",
                    source.display(),
                    target.display(),
                    into.display()
                );
                MergeStatus::SourceAlreadyMerged { into: into.clone() }
            } else {
                log::info!("Merging {} into {}", source.display(), target.display());
                match merge_directory(source, target, config) {
                    Ok(outcome) if outcome.aborted_on.is_some() => MergeStatus::Aborted(outcome),
                    Ok(outcome) => {
                        merged_into.insert(source.clone(), target.clone());
                        MergeStatus::Merged(outcome)
                    }
                    Err(MergeError::RemoveSource { outcome, source: e }) => {
                        log::error!("Merged {} but could not delete it: {}", source.display(), e);
                        merged_into.insert(source.clone(), target.clone());
                        MergeStatus::Failed {
                            error: e.to_string(),
                            outcome: Some(*outcome),
                        }
                    }
                    Err(e) => {
                        log::error!("{}", e);
                        MergeStatus::Failed {
                            error: e.to_string(),
                            outcome: None,
                        }
                    }
                }
            };

            results.push(MergeResult {
                source: source.clone(),
                target: target.clone(),
                status,
            });
        }
    }
    results
}
