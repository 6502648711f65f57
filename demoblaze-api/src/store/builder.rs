//! Fluent construction of [`StoreClient`] instances.

use super::StoreClient;
use crate::config::StoreConfig;
use demoblaze_core::{Result, SecretString};
use std::time::Duration;

/// Builder for [`StoreClient`] instances.
///
/// Starts from production defaults; every setter overrides one knob of the
/// underlying [`StoreConfig`].
///
/// # Example
///
/// ```no_run
/// use demoblaze_api::store::StoreClientBuilder;
/// use std::time::Duration;
///
/// let store = StoreClientBuilder::new()
///     .base_url("https://api.demoblaze.com")
///     .timeout(Duration::from_secs(10))
///     .max_attempts(5)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreClientBuilder {
    config: StoreConfig,
}

impl StoreClientBuilder {
    /// Creates a builder with production defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend base URL.
    ///
    /// Point this at a mock server to test without touching production.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Sets the per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the TCP connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Sets the total attempt budget per call, including the first attempt.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Sets the base delay between retry attempts.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Sets the default account credentials.
    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Self {
        self.config.username = Some(username.into());
        self.config.password = Some(password.into());
        self
    }

    /// Replaces the whole configuration at once.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the assembled configuration fails validation or
    /// the HTTP client cannot be constructed.
    pub fn build(self) -> Result<StoreClient> {
        StoreClient::new(self.config)
    }
}
