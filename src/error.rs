//! Error types for HAL embedding operations.
//!
//! The embedding core recovers locally from every per-relation failure by folding it into
//! an error document (see [`crate::types::ErrorDocument`]). The variants below are what is
//! left: failures for which no valid response exists to hand back to the caller.
//!
//! # Error Categories
//!
//! | Category | Variants | Retryable |
//! |----------|----------|-----------|
//! | Transport | `Http`, `Connect`, `Timeout` | `Connect`, `Timeout` |
//! | Document | `Json`, `Document` | No |
//! | Request | `InvalidUri`, `Request` | No |
//! | Configuration | `Config` | No |
//!
//! # Examples
//!
//! ```
//! use hal_embed::EmbedError;
//!
//! assert!(EmbedError::Timeout.is_retryable());
//! assert!(!EmbedError::Document("not an object".into()).is_retryable());
//! ```

use thiserror::Error;

/// Result type for embedding operations.
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Errors that can occur while fetching or composing HAL documents.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EmbedError {
    /// The underlying transport failed to produce a response.
    ///
    /// Protocol errors, body decoding failures and similar.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The connection could not be established or was dropped mid-exchange.
    #[error("Connection error: {0}")]
    Connect(String),

    /// The underlying transport gave up waiting for a response.
    #[error("Operation timed out")]
    Timeout,

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is valid JSON but not a HAL document (e.g. not an object, or a
    /// `_links` section of the wrong shape).
    #[error("Document error: {0}")]
    Document(String),

    /// A request target or link href could not be turned into a URI.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Building an HTTP request or response failed.
    #[error("Request error: {0}")]
    Request(#[from] http::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for EmbedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EmbedError::Timeout
        } else if err.is_connect() || is_connection_lost(&err) {
            EmbedError::Connect(err.to_string())
        } else {
            EmbedError::Http(err.to_string())
        }
    }
}

fn is_connection_lost(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return matches!(
                io.kind(),
                std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            );
        }
        source = cause.source();
    }
    false
}

impl From<url::ParseError> for EmbedError {
    fn from(err: url::ParseError) -> Self {
        EmbedError::InvalidUri(err.to_string())
    }
}

impl From<http::uri::InvalidUri> for EmbedError {
    fn from(err: http::uri::InvalidUri) -> Self {
        EmbedError::InvalidUri(err.to_string())
    }
}

impl EmbedError {
    /// Check if this error is transient.
    ///
    /// Only consulted by transports that implement their own retry policy; the
    /// embedding core itself never retries.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, EmbedError::Timeout | EmbedError::Connect(_))
    }
}
