use std::time::Duration;

use crate::error::{ConfigValidationError, ValidationResult};

/// Connection-level settings shared by every request sent through a
/// [`Session`](super::Session).
///
/// The base URL and default headers live here so individual requests only
/// need to describe the path, payload and any per-call overrides.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Root URL that request paths are resolved against,
    /// e.g. `https://api.demoblaze.com`.
    pub base_url: String,

    /// Default per-attempt timeout. A request can override this for a
    /// single call.
    pub timeout: Duration,

    /// Connection establishment timeout.
    pub connect_timeout: Duration,

    /// `User-Agent` header value sent with every request.
    pub user_agent: String,

    /// Headers attached to every request. A request carrying a header with
    /// the same name takes precedence for that call.
    pub default_headers: Vec<(String, String)>,

    /// Maximum response body size in bytes (default: 10MB).
    ///
    /// Responses that report or stream more than this are aborted.
    pub max_response_size: usize,

    /// Maximum idle connections kept alive per host (default: 10).
    pub pool_max_idle_per_host: usize,

    /// How long an idle pooled connection is kept before being closed
    /// (default: 90 seconds).
    pub pool_idle_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("demoblaze-rust/", env!("CARGO_PKG_VERSION")).to_string(),
            default_headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            max_response_size: 10 * 1024 * 1024,
            pool_max_idle_per_host: 10,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl SessionConfig {
    /// Creates a configuration for the given base URL, keeping every other
    /// setting at its default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use demoblaze_core::http::SessionConfig;
    ///
    /// let config = SessionConfig::new("https://api.demoblaze.com");
    /// assert_eq!(config.timeout.as_secs(), 30);
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validates the configuration values.
    ///
    /// Returns `Ok(ValidationResult)` when the configuration is usable; the
    /// result may carry warnings for legal but suspicious values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if:
    /// - `base_url` is empty or lacks an `http://`/`https://` scheme
    /// - `timeout` or `connect_timeout` is zero or above 5 minutes
    /// - `max_response_size` is zero or above 100MB
    pub fn validate(&self) -> Result<ValidationResult, ConfigValidationError> {
        let mut result = ValidationResult::new();

        if self.base_url.is_empty() {
            return Err(ConfigValidationError::missing("base_url"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigValidationError::invalid(
                "base_url",
                format!("'{}' must start with http:// or https://", self.base_url),
            ));
        }

        if self.timeout.is_zero() {
            return Err(ConfigValidationError::too_low(
                "timeout",
                format!("{:?}", self.timeout),
                "1ms",
            ));
        }
        if self.timeout > Duration::from_secs(300) {
            return Err(ConfigValidationError::too_high(
                "timeout",
                format!("{:?}", self.timeout),
                "300s",
            ));
        }
        if self.timeout < Duration::from_secs(1) {
            result.add_warning(format!(
                "timeout of {:?} is below 1s and may abort slow but healthy calls",
                self.timeout
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(ConfigValidationError::too_low(
                "connect_timeout",
                format!("{:?}", self.connect_timeout),
                "1ms",
            ));
        }
        if self.connect_timeout > Duration::from_secs(300) {
            return Err(ConfigValidationError::too_high(
                "connect_timeout",
                format!("{:?}", self.connect_timeout),
                "300s",
            ));
        }

        if self.max_response_size == 0 {
            return Err(ConfigValidationError::invalid(
                "max_response_size",
                "cannot be zero",
            ));
        }
        if self.max_response_size > 100 * 1024 * 1024 {
            return Err(ConfigValidationError::too_high(
                "max_response_size",
                self.max_response_size,
                100 * 1024 * 1024,
            ));
        }

        if self.pool_max_idle_per_host == 0 {
            result.add_warning(
                "pool_max_idle_per_host of 0 disables connection reuse".to_string(),
            );
        }

        Ok(result)
    }
}
