//! Environment-driven settings for the integration suites.
//!
//! Controls live-test gating (the mock suites always run), default account
//! credentials, a backend URL override for self-hosted mirrors, and the
//! default logging level.

use demoblaze_api::StoreConfig;
use demoblaze_core::SecretString;
use serde::Deserialize;
use std::env;

/// Test configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
#[allow(clippy::unsafe_derive_deserialize)]
pub struct TestConfig {
    /// Enable tests that talk to the real DemoBlaze backend.
    #[serde(default)]
    pub enable_live_tests: bool,

    /// Test timeout in seconds.
    #[serde(default = "default_timeout")]
    pub test_timeout_seconds: u64,

    /// Backend base URL override (defaults to production).
    pub api_base_url: Option<String>,

    /// Username for account operations.
    pub test_username: Option<String>,

    /// Password paired with `test_username`.
    pub test_password: Option<String>,

    /// Logging level for the `RUST_LOG` environment variable.
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            enable_live_tests: false,
            test_timeout_seconds: default_timeout(),
            api_base_url: None,
            test_username: None,
            test_password: None,
            rust_log: default_log_level(),
        }
    }
}

// envy fallbacks
fn default_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TestConfig {
    /// Reads the configuration from the process environment, loading a
    /// `.env` file first when one is present.
    ///
    /// # Errors
    ///
    /// Returns an error when a set variable fails to deserialize into its
    /// field.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use demoblaze_rust::test_config::TestConfig;
    ///
    /// let config = TestConfig::from_env().unwrap();
    /// ```
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env::<Self>()
    }

    /// Reads the configuration after loading the named `.env` file.
    ///
    /// # Arguments
    ///
    /// * `path` - The `.env` file to load
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or a variable fails to
    /// deserialize.
    pub fn from_dotenv(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::from_filename(path)?;
        Ok(Self::from_env()?)
    }

    /// Check if live API tests should be skipped.
    #[must_use]
    pub fn should_skip_live_tests(&self) -> bool {
        !self.enable_live_tests
    }

    /// Get the configured account credentials if both halves are present.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.test_username, &self.test_password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }

    /// Check if account credentials are configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_some()
    }

    /// Build a [`StoreConfig`] honoring the URL override and credentials.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::default();
        if let Some(base_url) = &self.api_base_url {
            config.base_url.clone_from(base_url);
        }
        config.username = self.test_username.clone();
        config.password = self.test_password.clone().map(SecretString::from);
        config
    }

    /// Installs the global logging subscriber for a test run.
    ///
    /// Seeds `RUST_LOG` from the configured level when the variable is not
    /// already set, then installs the default fmt subscriber.
    pub fn init_logging(&self) {
        if env::var("RUST_LOG").is_err() {
            unsafe {
                env::set_var("RUST_LOG", &self.rust_log);
            }
        }
        tracing_subscriber::fmt::init();
    }
}

/// Bails out of the surrounding test with a printed notice when the
/// condition holds.
///
/// # Examples
///
/// ```no_run
/// use demoblaze_rust::skip_if;
/// # use demoblaze_rust::test_config::TestConfig;
///
/// #[tokio::test]
/// async fn test_live_catalog() {
///     let config = TestConfig::from_env().unwrap();
///     skip_if!(config.should_skip_live_tests(), "Live API tests disabled");
/// }
/// ```
#[macro_export]
macro_rules! skip_if {
    ($condition:expr, $reason:expr) => {
        if $condition {
            println!("⚠️  Skipping test: {}", $reason);
            return;
        }
    };
}

/// Skip a test if account credentials are not configured.
///
/// # Examples
///
/// ```no_run
/// use demoblaze_rust::require_credentials;
/// # use demoblaze_rust::test_config::TestConfig;
///
/// #[tokio::test]
/// async fn test_live_login() {
///     let config = TestConfig::from_env().unwrap();
///     require_credentials!(config);
/// }
/// ```
#[macro_export]
macro_rules! require_credentials {
    ($config:expr) => {
        if !$config.has_credentials() {
            println!("⚠️  Skipping test: TEST_USERNAME / TEST_PASSWORD not configured");
            return;
        }
    };
}
