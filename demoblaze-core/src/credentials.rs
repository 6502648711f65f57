//! Secret handling for passwords and session tokens.
//!
//! Secrets are wrapped in [`SecretString`], which zeroes its memory on
//! drop and redacts itself in all formatted output, so a stray `{:?}` in
//! a log line cannot leak a password.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string that is zeroed on drop and redacted when formatted.
///
/// Use this for passwords and auth tokens. The wrapped value is only
/// reachable through [`expose_secret`](Self::expose_secret), which keeps
/// accidental uses visible in code review.
///
/// # Example
///
/// ```rust
/// use demoblaze_core::credentials::SecretString;
///
/// let password = SecretString::new("hunter2");
/// assert_eq!(password.expose_secret(), "hunter2");
/// assert_eq!(format!("{password:?}"), "[REDACTED]");
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wraps a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value.
    ///
    /// Use the reference immediately rather than storing it; copies made
    /// from it are outside the zeroization guarantee.
    #[inline]
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns the length of the secret in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the secret is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_redacted() {
        let secret = SecretString::new("hunter2");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(format!("{secret}"), "[REDACTED]");
    }

    #[test]
    fn test_expose_returns_value() {
        let secret = SecretString::new("hunter2");
        assert_eq!(secret.expose_secret(), "hunter2");
    }

    #[test]
    fn test_len_and_empty() {
        assert_eq!(SecretString::new("12345").len(), 5);
        assert!(SecretString::new("").is_empty());
        assert!(!SecretString::new("x").is_empty());
    }

    #[test]
    fn test_conversions() {
        let from_string: SecretString = String::from("token").into();
        let from_str: SecretString = "token".into();
        assert_eq!(from_string, from_str);
    }

    #[test]
    fn test_clone_preserves_value() {
        let original = SecretString::new("token");
        let copy = original.clone();
        assert_eq!(original.expose_secret(), copy.expose_secret());
    }
}
