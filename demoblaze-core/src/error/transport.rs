//! Transport-level error types.

use std::error::Error as StdError;
use thiserror::Error;

/// Failures raised below the HTTP semantic layer.
///
/// This type wraps everything that can go wrong before a status line is
/// received, without exposing third-party library types (like
/// `reqwest::Error`) in the public API. This keeps the API stable even when
/// the underlying HTTP library changes.
///
/// # Retryable Errors
///
/// The following variants are considered retryable:
/// - [`TransportError::TimedOut`] - Attempt timed out, may succeed on retry
/// - [`TransportError::ConnectionFailed`] - Connection failed, may be transient
///
/// TLS failures and unclassified transport errors are not retried: they
/// almost always reproduce identically on the next attempt.
///
/// # Example
///
/// ```rust
/// use demoblaze_core::error::TransportError;
///
/// fn describe(err: &TransportError) {
///     match err {
///         TransportError::ConnectionFailed(msg) => {
///             println!("connection failed: {}", msg);
///         }
///         TransportError::TimedOut => {
///             println!("attempt timed out, consider retrying");
///         }
///         _ => println!("transport error: {}", err),
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection could not be established or was dropped mid-flight.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The attempt exceeded its timeout, or the overall call deadline expired.
    #[error("Request timed out")]
    TimedOut,

    /// TLS negotiation or certificate verification failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Opaque transport failure that fits none of the other classes.
    /// Uses `Box<dyn StdError>` to hide implementation details while
    /// preserving the source chain.
    #[error("Transport error")]
    Unknown(#[source] Box<dyn StdError + Send + Sync + 'static>),
}

impl TransportError {
    /// Whether a retry of the same request could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::ConnectionFailed(_) | TransportError::TimedOut
        )
    }

    /// Short stable name for the error class, used in log records.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::ConnectionFailed(_) => "connection_failed",
            TransportError::TimedOut => "timed_out",
            TransportError::Tls(_) => "tls",
            TransportError::Unknown(_) => "unknown",
        }
    }
}
