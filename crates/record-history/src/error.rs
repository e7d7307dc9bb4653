//! Error types for record history operations.
//!
//! Absence of data (unknown id, unknown revision) is never an error: those
//! cases surface as `Ok(None)` from the read operations.

use git_cli_ops::{GitCliOpsError, Revision};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while storing or reading record history.
#[derive(Debug, Error)]
pub enum RecordHistoryError {
    /// Root or scratch path missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The directory or backend repository could not be created. Fatal for
    /// the handle.
    #[error("Repository at {root} failed to initialize: {reason}")]
    Initialization { root: PathBuf, reason: String },

    /// The repository does not exist and automatic initialization is off.
    #[error("Repository at {root} is unavailable: {reason}")]
    RepositoryUnavailable { root: PathBuf, reason: String },

    /// The id cannot name a file in the repository root.
    #[error("Invalid record id '{id}': {reason}")]
    InvalidRecordId { id: String, reason: &'static str },

    /// A backend invocation failed.
    #[error("Backend command failed: {0}")]
    Backend(#[from] GitCliOpsError),

    /// Staging or renaming succeeded but the commit did not. The working
    /// tree keeps the uncommitted change.
    #[error("Commit failed for record '{id}', working tree left uncommitted: {source}")]
    CommitFailed {
        id: String,
        #[source]
        source: GitCliOpsError,
    },

    /// Patch computation or reverse application failed.
    #[error("Failed to reconstruct record '{id}' at revision {revision}: {source}")]
    Reconstruction {
        id: String,
        revision: Revision,
        #[source]
        source: GitCliOpsError,
    },

    /// Stored content is not valid JSON.
    #[error("Record '{id}' at revision {revision} is not valid JSON: {source}")]
    Parse {
        id: String,
        revision: Revision,
        #[source]
        source: serde_json::Error,
    },

    /// The record could not be serialized.
    #[error("Failed to serialize record '{id}': {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem error in the working tree.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecordHistoryError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::Initialization { .. } => "initialization_error",
            Self::RepositoryUnavailable { .. } => "repository_unavailable",
            Self::InvalidRecordId { .. } => "invalid_record_id",
            Self::Backend(_) => "backend_command_error",
            Self::CommitFailed { .. } => "commit_failed",
            Self::Reconstruction { .. } => "reconstruction_error",
            Self::Parse { .. } => "parse_error",
            Self::Serialize { .. } => "serialize_error",
            Self::Io(_) => "io_error",
        }
    }
}

/// Result type alias using RecordHistoryError.
pub type RecordHistoryResult<T> = Result<T, RecordHistoryError>;
