//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the dirdupe application.
///
/// - 0: Success (completed normally, whether or not anything was found)
/// - 1: General error (unexpected failure, e.g. a directory could not be read)
/// - 2: Invalid root (missing or not a directory; nothing was touched)
/// - 3: Partial success (completed, but a deletion or merge failed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Analysis completed and every requested action succeeded.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Invalid root: The root path does not exist or is not a directory.
    InvalidRoot = 2,
    /// Partial success: Completed, but some deletions or merges failed.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DD000",
            Self::GeneralError => "DD001",
            Self::InvalidRoot => "DD002",
            Self::PartialSuccess => "DD003",
        }
    }

    /// Pick the exit code for an error returned by [`crate::run_app`].
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<crate::config::ConfigError>().is_some() {
            Self::InvalidRoot
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
