//! From implementations for converting between error types.

use crate::error::{ConfigValidationError, DecodeError, Error, TransportError};
use lazy_static::lazy_static;
use regex::Regex;
use std::error::Error as StdError;

lazy_static! {
    /// Regex pattern for recognizing TLS failures from error message text.
    ///
    /// `reqwest` reports TLS handshake and certificate problems as connect
    /// errors without a dedicated predicate, so classification has to look
    /// at the message chain. Word boundaries keep "tls" from matching inside
    /// unrelated tokens.
    static ref TLS_ERROR_PATTERN: Regex =
        Regex::new(r"(?i)\b(tls|ssl|certificate|handshake)\b")
            .expect("Invalid TLS error regex pattern");
}

/// Maximum length for error messages to prevent memory bloat from large HTTP responses.
pub(crate) const MAX_ERROR_MESSAGE_LEN: usize = 1024;

/// Truncates a string to a maximum length, adding "... (truncated)" if needed.
pub(crate) fn truncate_message(mut msg: String) -> String {
    if msg.len() > MAX_ERROR_MESSAGE_LEN {
        msg.truncate(MAX_ERROR_MESSAGE_LEN);
        msg.push_str("... (truncated)");
    }
    msg
}

/// Flattens an error and its source chain into a single probe string.
fn chain_message(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        current = cause.source();
    }
    message
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(Box::new(e))
    }
}

impl From<Box<TransportError>> for Error {
    fn from(e: Box<TransportError>) -> Self {
        Error::Transport(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(Box::new(e))
    }
}

impl From<Box<DecodeError>> for Error {
    fn from(e: Box<DecodeError>) -> Self {
        Error::Decode(e)
    }
}

impl From<ConfigValidationError> for Error {
    fn from(e: ConfigValidationError) -> Self {
        Error::Config(Box::new(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(Box::new(DecodeError::Json(e)))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return TransportError::TimedOut;
        }
        // The interesting detail (ECONNREFUSED, certificate name, ...) lives
        // in the source chain, not in the top-level Display output.
        let message = chain_message(&e);
        if TLS_ERROR_PATTERN.is_match(&message) {
            TransportError::Tls(truncate_message(message))
        } else if e.is_connect() {
            TransportError::ConnectionFailed(truncate_message(message))
        } else {
            TransportError::Unknown(Box::new(e))
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(Box::new(TransportError::from(e)))
    }
}
