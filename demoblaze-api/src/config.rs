//! Store client configuration.
//!
//! [`StoreConfig`] collects everything needed to stand up a [`StoreClient`]:
//! the backend base URL, timeouts, retry tuning, and optional test
//! credentials. It can be built directly, through
//! [`StoreClientBuilder`](crate::store::StoreClientBuilder), or read from the
//! environment via [`StoreConfig::from_env`].
//!
//! [`StoreClient`]: crate::store::StoreClient

use demoblaze_core::error::{ConfigValidationError, ValidationResult};
use demoblaze_core::{Result, RetryPolicy, SecretString, SessionConfig};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Production backend.
pub const DEFAULT_BASE_URL: &str = "https://api.demoblaze.com";

const ENV_BASE_URL: &str = "API_BASE_URL";
const ENV_TIMEOUT: &str = "API_TIMEOUT";
const ENV_CONNECT_TIMEOUT: &str = "API_CONNECT_TIMEOUT";
const ENV_MAX_ATTEMPTS: &str = "API_MAX_ATTEMPTS";
const ENV_RETRY_DELAY: &str = "API_RETRY_DELAY";
const ENV_USERNAME: &str = "TEST_USERNAME";
const ENV_PASSWORD: &str = "TEST_PASSWORD";

/// Configuration for a [`StoreClient`](crate::store::StoreClient).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the storefront backend.
    pub base_url: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Total attempts per call, including the first.
    pub max_attempts: u32,
    /// Base delay between retry attempts.
    pub retry_delay: Duration,
    /// Username for account operations in tests.
    pub username: Option<String>,
    /// Password paired with `username`.
    pub password: Option<SecretString>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
            username: None,
            password: None,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with production defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from environment variables.
    ///
    /// Unset variables keep their defaults. Recognized variables:
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `API_BASE_URL` | backend base URL |
    /// | `API_TIMEOUT` | request timeout, seconds |
    /// | `API_CONNECT_TIMEOUT` | connect timeout, seconds |
    /// | `API_MAX_ATTEMPTS` | total attempts per call |
    /// | `API_RETRY_DELAY` | base retry delay, seconds (fractions allowed) |
    /// | `TEST_USERNAME` / `TEST_PASSWORD` | default account credentials |
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = env_string(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(secs) = env_parse::<u64>(ENV_TIMEOUT)? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parse::<u64>(ENV_CONNECT_TIMEOUT)? {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = env_parse::<u32>(ENV_MAX_ATTEMPTS)? {
            config.max_attempts = attempts;
        }
        if let Some(secs) = env_parse::<f64>(ENV_RETRY_DELAY)? {
            config.retry_delay = Duration::try_from_secs_f64(secs).map_err(|e| {
                ConfigValidationError::invalid(ENV_RETRY_DELAY, format!("{secs}: {e}"))
            })?;
        }
        config.username = env_string(ENV_USERNAME);
        config.password = env_string(ENV_PASSWORD).map(SecretString::from);

        Ok(config)
    }

    /// Derives the transport session configuration.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            ..SessionConfig::new(&self.base_url)
        }
    }

    /// Derives the retry policy.
    ///
    /// Only the attempt budget and base delay are taken from this
    /// configuration; multiplier, jitter, and the retryable status set keep
    /// the policy defaults.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        let base_delay_ms = u64::try_from(self.retry_delay.as_millis()).unwrap_or(u64::MAX);
        let defaults = RetryPolicy::default();
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay_ms,
            max_delay_ms: defaults.max_delay_ms.max(base_delay_ms),
            ..defaults
        }
    }

    /// Validates the configuration and everything derived from it.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint from the derived session
    /// configuration, the derived retry policy, or the credential pairing.
    pub fn validate(&self) -> std::result::Result<ValidationResult, ConfigValidationError> {
        let mut result = self.session_config().validate()?;
        result.merge(self.retry_policy().validate()?);

        match (&self.username, &self.password) {
            (Some(_), None) => {
                result.add_warning("username is set without a password; account operations will be rejected by the backend");
            }
            (None, Some(_)) => {
                result.add_warning("password is set without a username and will never be used");
            }
            _ => {}
        }

        Ok(result)
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(name: &'static str) -> std::result::Result<Option<T>, ConfigValidationError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigValidationError::invalid(name, format!("'{raw}': {e}"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigValidationError::invalid(name, e.to_string())),
    }
}
