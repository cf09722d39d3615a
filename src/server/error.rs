//! Error types for the HTTP server.

use thiserror::Error;

use crate::request::Error as ParseError;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A route path contains an unusable dynamic segment.
    #[error("Invalid route pattern: {0}")]
    InvalidRoutePattern(String),

    /// Error building a response.
    #[error("Response error: {0}")]
    ResponseError(#[from] crate::response::Error),

    /// Error building a cookie.
    #[error("Cookie error: {0}")]
    CookieError(#[from] crate::cookies::Error),

    /// Internal server error reported by a handler.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
