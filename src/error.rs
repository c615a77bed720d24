//! Error types for the Vexata API client

use std::io;
use thiserror::Error;

/// Errors that can occur when talking to a Vexata array
#[derive(Error, Debug)]
pub enum Error {
    /// A required connection parameter is missing or empty
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller broke an API contract; raised before any network call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Host, port and path do not form a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// An HTTP request could not be assembled from the given parts
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// TLS/SSL setup error
    #[error("TLS error: {0}")]
    Tls(String),

    /// Network or connection error (DNS, refused connection, TLS handshake)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// The array answered with a status other than the expected one
    #[error("Unexpected status {status} (expected {expected}): {body}")]
    UnexpectedStatus {
        /// HTTP status code returned by the array
        status: u16,
        /// Status code the operation expected
        expected: u16,
        /// Response body, lossily decoded as UTF-8
        body: String,
    },

    /// The response body does not have the shape the operation needs
    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// HTTP status carried by an [`Error::UnexpectedStatus`]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
