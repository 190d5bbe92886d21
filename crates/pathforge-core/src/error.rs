//! Core error types for pathforge-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures reject the mutation and leave state untouched; storage failures
//! are fail-soft at the engine boundary (the engine keeps operating on
//! in-memory state). Precondition misses such as starting a trial below the
//! level gate are not errors at all -- those surface as boolean returns on
//! the corresponding engine methods.

use thiserror::Error;

/// Core error type for pathforge-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed mutation input; state left untouched
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Persistence collaborator failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Required text field was empty
    #[error("'{field}' must not be empty")]
    Empty { field: String },

    /// No identity path has been chosen yet
    #[error("no identity path selected; complete onboarding first")]
    IdentityUnset,

    /// Identity path is already fixed and cannot change
    #[error("identity path is already set to '{current}'")]
    IdentityAlreadySet { current: String },

    /// Referenced protocol does not exist
    #[error("unknown protocol id: {id}")]
    UnknownProtocol { id: String },

    /// Value outside its allowed range
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: std::path::PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Persisted snapshot could not be decoded
    #[error("Corrupt state snapshot: {0}")]
    CorruptSnapshot(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
