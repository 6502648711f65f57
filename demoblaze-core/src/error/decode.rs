//! Response decoding error types.

use std::borrow::Cow;
use thiserror::Error;

/// Errors raised while turning a successful response body into typed data.
///
/// A decode failure always means the HTTP exchange itself succeeded: the
/// backend answered with an acceptable status, but the body did not match the
/// contract the caller expected. These are surfaced verbatim and never
/// retried.
///
/// # Memory Optimization
///
/// Uses `Cow<'static, str>` for field names and messages to avoid allocation
/// when using static strings. Use the helper constructors for ergonomic creation:
///
/// ```rust
/// use demoblaze_core::error::DecodeError;
///
/// // Zero allocation (static string)
/// let err = DecodeError::missing_field("title");
///
/// // Allocation only when needed (dynamic string)
/// let field_name = format!("items[{}]", 3);
/// let err = DecodeError::missing_field_owned(field_name);
///
/// // Invalid value with context
/// let err = DecodeError::invalid_value("price", "must be non-negative");
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DecodeError {
    /// Failed to deserialize JSON.
    #[error("Failed to deserialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required field in response.
    #[error("Missing required field: {0}")]
    MissingField(Cow<'static, str>),

    /// Invalid value for a field.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: Cow<'static, str>,
        /// Error message
        message: Cow<'static, str>,
    },

    /// Body was well-formed but did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    UnexpectedBody(Cow<'static, str>),
}

impl DecodeError {
    /// Creates a `MissingField` error with a static string (no allocation).
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(Cow::Borrowed(field))
    }

    /// Creates a `MissingField` error with a dynamic string.
    #[must_use]
    pub fn missing_field_owned(field: String) -> Self {
        Self::MissingField(Cow::Owned(field))
    }

    /// Creates an `InvalidValue` error.
    pub fn invalid_value(
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an `UnexpectedBody` error.
    pub fn unexpected_body(message: impl Into<Cow<'static, str>>) -> Self {
        Self::UnexpectedBody(message.into())
    }
}
