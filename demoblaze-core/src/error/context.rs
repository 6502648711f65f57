//! The [`ContextExt`] trait for layering operation context onto failures.

use crate::error::{Error, Result};
use std::fmt;

/// Attaches a caller-side description to errors bubbling up from lower
/// layers, so a transport failure still names the operation that was in
/// flight when it surfaces in a test log.
///
/// `context` takes the message eagerly; `with_context` defers building it
/// until an error actually occurs. On `Option`, a `None` becomes an
/// [`Error::InvalidRequest`] carrying the message.
///
/// # Examples
///
/// ```rust
/// use demoblaze_core::error::{Result, ContextExt};
///
/// fn token_from_body(body: &serde_json::Value) -> Result<&str> {
///     body.as_str()
///         .context("login response body is not a string")
/// }
/// ```
pub trait ContextExt<T, E> {
    /// Wraps the error value with the given description.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Like [`context`](Self::context), but the description is built only
    /// when there is an error to attach it to.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ContextExt<T, E> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| e.into().context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().context(f().to_string()))
    }
}

impl<T> ContextExt<T, Error> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::generic(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::generic(f().to_string()))
    }
}
