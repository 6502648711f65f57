//! Retry policy with exponential backoff.
//!
//! The policy is a pure decision component: given the outcome of an attempt
//! and the attempt number, it answers "try again?" and "after how long?".
//! It never sleeps and never touches the network, which keeps every rule
//! here unit-testable with plain assertions.
//!
//! # Features
//! - Exponential backoff with a hard delay cap
//! - Optional downward jitter to desynchronize parallel test runners
//! - Configurable retryable status set and transport failure kinds
//! - Server-driven delays (`Retry-After`) clamped to the same cap

use crate::error::{ConfigValidationError, TransportError, ValidationResult};
use std::borrow::Cow;
use std::time::Duration;

/// HTTP statuses retried by default: rate limiting plus the transient 5xx family.
pub const DEFAULT_RETRYABLE_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// Retry policy configuration.
///
/// Immutable once constructed; the executor holds one instance and consults
/// it for every attempt of every call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt budget for one logical call, first attempt included.
    /// A value of 1 disables retries entirely.
    pub max_attempts: u32,
    /// Base delay in milliseconds before the first retry.
    pub base_delay_ms: u64,
    /// Ceiling in milliseconds that no computed delay may exceed.
    pub max_delay_ms: u64,
    /// Backoff multiplier applied per attempt (must be >= 1.0).
    pub multiplier: f64,
    /// Jitter factor (0.0-1.0): the portion of each delay that may be
    /// randomly shaved off. 0.0 makes delays fully deterministic.
    pub jitter_factor: f64,
    /// HTTP statuses that qualify for a retry.
    pub retryable_statuses: Cow<'static, [u16]>,
    /// Whether connection failures qualify for a retry.
    pub retry_on_connection: bool,
    /// Whether timeouts qualify for a retry.
    pub retry_on_timeout: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30000,
            multiplier: 2.0,
            jitter_factor: 0.1,
            retryable_statuses: Cow::Borrowed(DEFAULT_RETRYABLE_STATUSES),
            retry_on_connection: true,
            retry_on_timeout: true,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy that never retries: one attempt, no delays.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 1000,
            max_delay_ms: 1000,
            multiplier: 1.0,
            jitter_factor: 0.0,
            ..Self::default()
        }
    }

    /// Creates an aggressive policy with more attempts and longer delays,
    /// for test environments known to be flaky.
    pub fn aggressive() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 500,
            max_delay_ms: 60000,
            multiplier: 2.0,
            jitter_factor: 0.2,
            ..Self::default()
        }
    }

    /// Checks the policy for values the executor refuses to run with.
    ///
    /// A passing policy still produces a [`ValidationResult`], which may
    /// carry warnings about legal but questionable settings (a jitter
    /// factor that randomizes most of every delay, say).
    ///
    /// # Rules
    ///
    /// - `max_attempts` must be >= 1 and <= 10
    /// - `base_delay_ms` must be >= 10 (shorter delays hammer the backend)
    /// - `max_delay_ms` must be >= `base_delay_ms`
    /// - `multiplier` must be >= 1.0 (delays never shrink across attempts)
    /// - `jitter_factor` must be within [0.0, 1.0]
    ///
    /// # Example
    ///
    /// ```rust
    /// use demoblaze_core::retry::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert!(policy.validate().is_ok());
    ///
    /// let invalid = RetryPolicy {
    ///     max_attempts: 0, // must keep at least one attempt
    ///     ..Default::default()
    /// };
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<ValidationResult, ConfigValidationError> {
        let mut result = ValidationResult::new();

        if self.max_attempts < 1 {
            return Err(ConfigValidationError::too_low(
                "max_attempts",
                self.max_attempts,
                1,
            ));
        }
        if self.max_attempts > 10 {
            return Err(ConfigValidationError::too_high(
                "max_attempts",
                self.max_attempts,
                10,
            ));
        }
        if self.base_delay_ms < 10 {
            return Err(ConfigValidationError::too_low(
                "base_delay_ms",
                self.base_delay_ms,
                10,
            ));
        }
        if self.max_delay_ms < self.base_delay_ms {
            return Err(ConfigValidationError::too_low(
                "max_delay_ms",
                self.max_delay_ms,
                self.base_delay_ms,
            ));
        }
        if self.multiplier < 1.0 || !self.multiplier.is_finite() {
            return Err(ConfigValidationError::invalid(
                "multiplier",
                "must be a finite value >= 1.0",
            ));
        }
        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err(ConfigValidationError::invalid(
                "jitter_factor",
                "must be within [0.0, 1.0]",
            ));
        }

        if self.jitter_factor > 0.5 {
            result.add_warning(format!(
                "jitter_factor {} randomizes more than half of every delay",
                self.jitter_factor
            ));
        }

        Ok(result)
    }

    /// Whether the given HTTP status qualifies for a retry at all,
    /// independent of the attempt budget.
    #[must_use]
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Decides whether a failed attempt that produced an HTTP status should
    /// be retried.
    ///
    /// # Arguments
    ///
    /// * `status` - The status the attempt came back with.
    /// * `attempt` - The number of attempts performed so far (1-based).
    #[must_use]
    pub fn should_retry_status(&self, status: u16, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        self.is_retryable_status(status)
    }

    /// Decides whether a failed attempt that produced a transport error
    /// should be retried.
    ///
    /// Connection failures and timeouts are retried when the corresponding
    /// flag is set; TLS and unclassified failures never are, since they
    /// reproduce identically on every attempt.
    #[must_use]
    pub fn should_retry_transport(&self, error: &TransportError, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        match error {
            TransportError::ConnectionFailed(_) => self.retry_on_connection,
            TransportError::TimedOut => self.retry_on_timeout,
            _ => false,
        }
    }

    /// Computes the deterministic backoff delay after the given attempt,
    /// before jitter: `min(max_delay, base_delay * multiplier^(attempt-1))`.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The attempt that just failed (1-based); the first retry
    ///   therefore waits `base_delay_ms`.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_ms(attempt))
    }

    /// Computes the actual delay before the next attempt: the backoff delay
    /// with jitter applied.
    ///
    /// Jitter only ever shortens the wait, so the `max_delay_ms` cap holds
    /// with or without it.
    #[must_use]
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let delay_ms = self.backoff_ms(attempt);
        if self.jitter_factor > 0.0 {
            Duration::from_millis(self.apply_jitter(delay_ms))
        } else {
            Duration::from_millis(delay_ms)
        }
    }

    #[allow(clippy::cast_precision_loss)]
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    fn backoff_ms(&self, attempt: u32) -> u64 {
        // Past 2^64 the cap has long since kicked in; clamping the exponent
        // keeps powi away from overflow territory.
        let exponent = attempt.saturating_sub(1).min(64) as i32;
        let raw = self.base_delay_ms as f64 * self.multiplier.powi(exponent);
        raw.min(self.max_delay_ms as f64).max(0.0) as u64
    }

    /// Clamps a server-provided `Retry-After` delay to the policy cap.
    ///
    /// A backend may ask for an arbitrarily long pause; honoring it
    /// unclamped would let a single header stall a test run.
    #[must_use]
    pub fn clamp_retry_after(&self, retry_after_secs: u64) -> Duration {
        let requested_ms = retry_after_secs.saturating_mul(1000);
        Duration::from_millis(requested_ms.min(self.max_delay_ms))
    }

    /// Shaves a uniform random slice off the delay to desynchronize
    /// concurrent runners.
    fn apply_jitter(&self, delay_ms: u64) -> u64 {
        use rand::Rng;
        let mut rng = rand::rngs::ThreadRng::default();
        #[allow(clippy::cast_precision_loss)]
        #[allow(clippy::cast_possible_truncation)]
        #[allow(clippy::cast_sign_loss)]
        let jitter_range = (delay_ms as f64 * self.jitter_factor) as u64;
        let jitter = rng.random_range(0..=jitter_range);
        delay_ms.saturating_sub(jitter)
    }
}
