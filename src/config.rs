//! Run configuration.
//!
//! A [`Config`] is assembled from the command line once per run. There is no
//! configuration file and no persisted state.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::actions::{ConflictPolicy, DeleteConfig, MergeConfig};
use crate::cli::{Cli, OutputFormat};

/// Problems with the requested root, detected before anything is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The root path does not exist.
    #[error("Directory '{0}' does not exist")]
    RootNotFound(PathBuf),

    /// The root path exists but is not a directory.
    #[error("'{0}' is not a directory")]
    RootNotADirectory(PathBuf),
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Canonicalized root directory.
    pub root: PathBuf,
    /// Delete duplicate directories.
    pub remove_duplicates: bool,
    /// Merge overlapping directories.
    pub merge: bool,
    /// Print surviving directories.
    pub print_unique: bool,
    /// Name collision handling during merges.
    pub on_conflict: ConflictPolicy,
    /// Send removed directories to the trash.
    pub use_trash: bool,
    /// Report format.
    pub output: OutputFormat,
    /// Color the text report.
    pub color: bool,
}

impl Config {
    /// Build a configuration for `root` with every action disabled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `root` is missing or not a directory.
    pub fn for_root(root: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            root: resolve_root(root)?,
            remove_duplicates: false,
            merge: false,
            print_unique: false,
            on_conflict: ConflictPolicy::default(),
            use_trash: false,
            output: OutputFormat::default(),
            color: false,
        })
    }

    /// Build a configuration from parsed CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the root path is missing or not a directory.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::for_root(&cli.path)?;
        config.remove_duplicates = cli.remove;
        config.merge = cli.merge;
        config.print_unique = cli.print_unique;
        config.on_conflict = cli.on_conflict;
        config.use_trash = cli.trash;
        config.output = cli.output;
        config.color = !cli.no_color && io::stdout().is_terminal();
        log::debug!("Config: {config:?}");
        Ok(config)
    }

    /// How directories are removed.
    #[must_use]
    pub fn delete_config(&self) -> DeleteConfig {
        if self.use_trash {
            DeleteConfig::trash()
        } else {
            DeleteConfig::permanent()
        }
    }

    /// How overlapping directories are merged.
    #[must_use]
    pub fn merge_config(&self) -> MergeConfig {
        MergeConfig::default()
            .with_conflict_policy(self.on_conflict)
            .with_delete_config(self.delete_config())
    }
}

/// Canonicalize `root` and check it is a directory.
fn resolve_root(root: &Path) -> Result<PathBuf, ConfigError> {
    let resolved = root
        .canonicalize()
        .map_err(|_| ConfigError::RootNotFound(root.to_path_buf()))?;
    if resolved.is_dir() {
        Ok(resolved)
    } else {
        Err(ConfigError::RootNotADirectory(resolved))
    }
}
