//! Core error types for Gielinor.
//!
//! [`ApiError`] is the single error type every provider client returns.
//! It replaces a per-provider class hierarchy with one tagged enum that
//! carries the provider it originated from, so callers can match on the
//! failure kind without caring which upstream produced it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::models::ProviderKind;

// ============================================================================
// Core Error
// ============================================================================

/// Core error type for Gielinor operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Provider not found or not supported.
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// Error Kind
// ============================================================================

/// Discriminant of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The upstream answered 404.
    NotFound,
    /// The upstream answered 429.
    RateLimit,
    /// Any other non-2xx answer, or a logical failure inside a 2xx envelope.
    ServerError,
    /// The payload did not match the declared shape.
    ParseError,
    /// The per-attempt timeout elapsed.
    Timeout,
    /// The caller cancelled the call.
    Cancelled,
    /// Connection-level failure (DNS, TLS, reset, ...).
    Transport,
    /// The request could not be built (bad base URL, bad header value).
    InvalidRequest,
}

impl ErrorKind {
    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::RateLimit => "rate_limit",
            Self::ServerError => "server_error",
            Self::ParseError => "parse_error",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::Transport => "transport",
            Self::InvalidRequest => "invalid_request",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// API Error
// ============================================================================

/// Error returned by every provider client operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The requested resource does not exist upstream (HTTP 404).
    #[error("{provider}: not found: {message}")]
    NotFound {
        /// Provider that answered.
        provider: ProviderKind,
        /// Message extracted from the response, if any.
        message: String,
    },

    /// The upstream throttled the request (HTTP 429).
    #[error("{provider}: rate limited: {message}")]
    RateLimited {
        /// Provider that answered.
        provider: ProviderKind,
        /// Message extracted from the response, if any.
        message: String,
    },

    /// The upstream reported a failure.
    #[error("{provider}: server error ({status}): {message}")]
    Server {
        /// Provider that answered.
        provider: ProviderKind,
        /// HTTP status of the response. A logical failure reported inside a
        /// success envelope keeps the 2xx status it arrived with.
        status: u16,
        /// Best-effort message extracted from the body.
        message: String,
    },

    /// The response did not match the declared payload shape.
    #[error("{provider}: invalid payload: {message}")]
    Parse {
        /// Provider that answered.
        provider: ProviderKind,
        /// Validation failure detail.
        message: String,
    },

    /// The attempt did not complete in time.
    #[error("{provider}: request timed out after {after:?}")]
    Timeout {
        /// Provider that was called.
        provider: ProviderKind,
        /// Timeout that elapsed.
        after: Duration,
    },

    /// The caller cancelled the call.
    #[error("{provider}: request cancelled")]
    Cancelled {
        /// Provider that was called.
        provider: ProviderKind,
    },

    /// The request never produced an HTTP response.
    #[error("{provider}: transport error: {message}")]
    Transport {
        /// Provider that was called.
        provider: ProviderKind,
        /// Underlying error text.
        message: String,
    },

    /// The request could not be constructed.
    #[error("{provider}: invalid request: {message}")]
    InvalidRequest {
        /// Provider that was called.
        provider: ProviderKind,
        /// What was wrong with it.
        message: String,
    },
}

impl ApiError {
    /// Returns the discriminant of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RateLimited { .. } => ErrorKind::RateLimit,
            Self::Server { .. } => ErrorKind::ServerError,
            Self::Parse { .. } => ErrorKind::ParseError,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
        }
    }

    /// Returns the provider this error came from.
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::NotFound { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::Server { provider, .. }
            | Self::Parse { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::Cancelled { provider }
            | Self::Transport { provider, .. }
            | Self::InvalidRequest { provider, .. } => *provider,
        }
    }

    /// Returns the HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if another attempt could succeed.
    ///
    /// Not-found, parse, invalid-request and cancelled errors are terminal.
    /// Rate limits are always retried, server errors only for 5xx, and
    /// anything else (timeouts, transport failures) is retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NotFound { .. }
            | Self::Parse { .. }
            | Self::InvalidRequest { .. }
            | Self::Cancelled { .. } => false,
            Self::RateLimited { .. } => true,
            Self::Server { status, .. } => *status >= 500,
            Self::Timeout { .. } | Self::Transport { .. } => true,
        }
    }

    /// Creates a parse error from a serde failure.
    pub fn parse(provider: ProviderKind, err: &serde_json::Error) -> Self {
        Self::Parse {
            provider,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
