//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// HTTP Error
// ============================================================================

/// Error produced by a single HTTP exchange.
///
/// This is an intermediate error: provider clients always convert it into a
/// [`gielinor_core::ApiError`] before it reaches their caller.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered with a non-2xx status. The body is kept as raw
    /// text so each provider can interpret its own error envelope.
    #[error("HTTP {status}")]
    Status {
        /// Response status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The per-request timeout elapsed.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The caller's cancellation token fired.
    #[error("Request cancelled")]
    Cancelled,

    /// The request failed before a response was received.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A 2xx body was not valid JSON, or a request body could not be encoded.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl HttpError {
    /// Returns the HTTP status if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
