//! Configuration validation error types.
//!
//! Validation failures are hard errors that prevent a client from being
//! built; warnings flag values that are legal but likely misconfigured
//! (for example a sub-second request timeout).
//!
//! # Example
//!
//! ```rust
//! use demoblaze_core::error::{ConfigValidationError, ValidationResult};
//!
//! fn validate_max_attempts(value: u32) -> Result<ValidationResult, ConfigValidationError> {
//!     if value < 1 {
//!         return Err(ConfigValidationError::too_low("max_attempts", value, 1));
//!     }
//!     Ok(ValidationResult::new())
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// A configuration field that failed validation.
///
/// Each variant carries the field name and the offending value so the
/// message alone is enough to fix the configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigValidationError {
    /// The value sits above the allowed range.
    #[error("Field '{field}' is {value}, above the allowed maximum of {max}")]
    ValueTooHigh {
        /// Field that failed.
        field: &'static str,
        /// Value as provided.
        value: String,
        /// Upper bound it violated.
        max: String,
    },

    /// The value sits below the allowed range.
    #[error("Field '{field}' is {value}, below the allowed minimum of {min}")]
    ValueTooLow {
        /// Field that failed.
        field: &'static str,
        /// Value as provided.
        value: String,
        /// Lower bound it violated.
        min: String,
    },

    /// The value is malformed in a way a range check cannot express.
    #[error("Field '{field}' is invalid: {reason}")]
    ValueInvalid {
        /// Field that failed.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A mandatory field was left unset.
    #[error("Field '{field}' is required but not set")]
    ValueMissing {
        /// Field that is absent.
        field: &'static str,
    },
}

impl ConfigValidationError {
    /// Builds a [`ValueTooHigh`](Self::ValueTooHigh) error.
    pub fn too_high<V: fmt::Display, M: fmt::Display>(
        field: &'static str,
        value: V,
        max: M,
    ) -> Self {
        ConfigValidationError::ValueTooHigh {
            field,
            value: value.to_string(),
            max: max.to_string(),
        }
    }

    /// Builds a [`ValueTooLow`](Self::ValueTooLow) error.
    pub fn too_low<V: fmt::Display, M: fmt::Display>(
        field: &'static str,
        value: V,
        min: M,
    ) -> Self {
        ConfigValidationError::ValueTooLow {
            field,
            value: value.to_string(),
            min: min.to_string(),
        }
    }

    /// Builds a [`ValueInvalid`](Self::ValueInvalid) error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigValidationError::ValueInvalid {
            field,
            reason: reason.into(),
        }
    }

    /// Builds a [`ValueMissing`](Self::ValueMissing) error.
    pub fn missing(field: &'static str) -> Self {
        ConfigValidationError::ValueMissing { field }
    }

    /// Names the configuration field the error is about.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self {
            ConfigValidationError::ValueTooHigh { field, .. }
            | ConfigValidationError::ValueTooLow { field, .. }
            | ConfigValidationError::ValueInvalid { field, .. }
            | ConfigValidationError::ValueMissing { field } => field,
        }
    }
}

/// What a passing validation wants to tell the caller anyway.
///
/// Holds warnings for values that pass validation but deserve a second
/// look. An empty result means the configuration is unremarkable.
///
/// # Example
///
/// ```rust
/// use demoblaze_core::error::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// result.add_warning("timeout below 1s will abort most live calls");
/// assert!(result.has_warnings());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Non-fatal findings, in the order the checks ran.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// An empty result: validation passed without remarks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// A result pre-seeded with warnings.
    #[must_use]
    pub fn with_warnings(warnings: Vec<String>) -> Self {
        Self { warnings }
    }

    /// Records one warning.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// `true` when validation passed without remarks.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.warnings.is_empty()
    }

    /// `true` when at least one warning was recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Folds another result's warnings into this one, preserving order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
    }
}
