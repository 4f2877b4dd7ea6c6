//! Error types for Rescore
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Rescore
#[derive(Debug, Error)]
pub enum RescoreError {
    /// Collection was empty when a batch mutation was requested
    #[error("No records found in collection: {0}")]
    NoRecords(String),

    /// Storage read or batch commit failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Invalid state transition or corrupt persisted value
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for RescoreError {
    fn from(err: rusqlite::Error) -> Self {
        RescoreError::Persistence(err.to_string())
    }
}

/// Result type alias for Rescore operations
pub type Result<T> = std::result::Result<T, RescoreError>;
