//! Core error types for livepulse-core.
//!
//! This module defines the error hierarchy using thiserror. Note that the
//! counter engine itself never surfaces storage or sentiment errors to its
//! caller -- those paths degrade to defaults -- so these types mostly show up
//! at the edges (opening the database, loading configuration, CLI plumbing).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for livepulse-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sentiment provider errors
    #[error("Sentiment error: {0}")]
    Sentiment(#[from] SentimentError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the key-value database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Sentiment-provider errors.
///
/// These are absorbed by `SentimentClient::fetch_or_neutral`; they exist so
/// the raw `fetch` path can report what actually went wrong.
#[derive(Error, Debug)]
pub enum SentimentError {
    /// Endpoint URL is not configured
    #[error("Sentiment endpoint not configured")]
    NotConfigured,

    /// HTTP transport failure
    #[error("Sentiment request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint returned a non-success status
    #[error("Sentiment endpoint returned HTTP {status}")]
    Status { status: u16 },
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
