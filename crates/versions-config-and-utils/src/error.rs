//! Core error types for configuration and wiring.

use thiserror::Error;

/// Core error type for configuration, paths and bootstrap.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Path error (e.g., home directory not found)
    #[error("Path error: {0}")]
    Path(String),

    /// The record repository could not be opened
    #[error("Repository error: {0}")]
    Repository(#[from] record_history::RecordHistoryError),
}

/// Result type alias using CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
