//! Error types for webhook delivery.

use std::time::Duration;

use thiserror::Error;

/// Error type for the HTTP transport.
///
/// Raised when no HTTP response was obtained at all. A response with an
/// error status is not an `HttpError`.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Terminal outcome of a failed delivery.
///
/// Rate limiting is absorbed by the sender and only shows up here as
/// [`DeliveryError::RateLimitExhausted`] when a bounded
/// [`RateLimitPolicy`](super::RateLimitPolicy) gives up.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The payload could not be serialized. Nothing was sent.
    #[error("Failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport failed before a response was received.
    #[error("Error posting webhook: {0}")]
    Transport(#[from] HttpError),

    /// The endpoint answered with a status that is neither success nor 429.
    #[error("Error posting webhook: {status}")]
    Status {
        /// Response status (its display form is the status line text, e.g. `403 Forbidden`)
        status: http::StatusCode,
        /// Response body, when it was valid UTF-8 and not empty
        body: Option<String>,
    },

    /// The rate-limit policy's attempt or wait budget ran out.
    #[error("Still rate limited after {attempts} attempts ({waited:?} spent waiting)")]
    RateLimitExhausted {
        /// POST requests issued
        attempts: u32,
        /// Total time spent paused
        waited: Duration,
    },
}

impl DeliveryError {
    /// Returns the HTTP status for [`DeliveryError::Status`] errors.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
