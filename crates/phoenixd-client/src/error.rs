//! Error types for phoenixd-client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when calling the phoenixd API.
#[derive(Debug, Error)]
pub enum PhoenixdError {
    /// HTTP request failed or the response could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Daemon answered with a non-success status.
    #[error("HTTP {status}: {reason}")]
    Status { status: StatusCode, reason: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
