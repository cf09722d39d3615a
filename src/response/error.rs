//! Error types for HTTP response building.

use thiserror::Error;

/// Errors that can occur while building responses.
#[derive(Debug, Error)]
pub enum Error {
    /// The numeric status code is not a known HTTP status.
    #[error("Invalid HTTP status code: {0}")]
    InvalidStatus(u16),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error while reading a file body.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
