//! CLI error types and exit codes.

use std::path::PathBuf;

use flexlist_core::AdapterError;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, input files or output
    pub const GENERAL_ERROR: i32 = 1;
    /// A scripted adapter operation failed
    pub const OPERATION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tree or script file could not be read or parsed
    #[error("Invalid input {path}: {message}")]
    Input {
        /// File that failed
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// A scripted operation was rejected by the adapter
    #[error("Step {step} ({operation}) failed: {source}")]
    Operation {
        /// One-based index of the failing step
        step: usize,
        /// Operation name
        operation: &'static str,
        /// Adapter error
        #[source]
        source: AdapterError,
    },

    /// Output could not be encoded
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, input, output, IO)
    /// - 2: A scripted operation failed
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Operation { .. } => exit_codes::OPERATION_FAILURE,
            Self::Config(_) | Self::Input { .. } | Self::Output(_) | Self::Io(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}
