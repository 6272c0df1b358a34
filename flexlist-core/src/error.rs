//! Error types for `FlexList`
//!
//! Each subsystem has its own error enum; [`FlexListError`] wraps them for
//! callers that only need a single error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::NodeId;

/// Errors raised by adapter operations.
///
/// Speculative operations (expand, collapse, toggle) never fail when their
/// preconditions are not met; they return a zero or `false` result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// A position argument was outside the flat sequence.
    #[error("position {position} is out of bounds (length {len})")]
    OutOfBounds {
        /// The offending position
        position: usize,
        /// Length of the flat sequence at the time of the call
        len: usize,
    },

    /// Internal state disagreed with itself. Indicates a defect.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A node id was not present in the node store.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// The node at the given position is not a parent.
    #[error("node at position {0} is not a parent")]
    NotAParent(usize),

    /// A range removal contained both parent and child rows.
    #[error("range {start}..{end} mixes parent and child rows", end = .start + .count)]
    MixedRun {
        /// First position of the run
        start: usize,
        /// Number of rows in the run
        count: usize,
    },
}

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write a settings file
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`crate::config::AdapterSettings`]
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be encoded
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No platform configuration directory could be determined
    #[error("no configuration directory available")]
    NoConfigDir,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while exporting or importing adapter state.
#[derive(Debug, Error)]
pub enum StateError {
    /// State could not be encoded as JSON
    #[error("failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),

    /// State JSON was malformed
    #[error("failed to deserialize state: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// Replaying the state against the adapter failed
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// Result type for state persistence operations
pub type StateResult<T> = Result<T, StateError>;

/// Top-level error type covering every subsystem.
#[derive(Debug, Error)]
pub enum FlexListError {
    /// Adapter operation failed
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Configuration failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// State persistence failed
    #[error(transparent)]
    State(#[from] StateError),

    /// Generic I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
