//! Error types for cookie handling.

use thiserror::Error;

/// Errors that can occur while building cookies.
#[derive(Debug, Error)]
pub enum Error {
    /// The expiration date is not in `Day, DD Mon YYYY HH:MM:SS GMT` form.
    #[error("Invalid cookie expiration date: {0}")]
    InvalidExpires(String),
}
