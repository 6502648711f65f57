use std::time::{Duration, Instant};

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;

use super::outcome::{AttemptRecord, Disposition, RawResponse, ResponseOutcome};
use super::session::Session;
use super::spec::RequestSpec;

/// Drives a [`RequestSpec`] through the retry loop until a terminal outcome.
///
/// The executor owns the separation of concerns: the [`Session`] performs
/// single exchanges, the [`RetryPolicy`] decides whether and when to try
/// again, and the executor stitches the two together while recording what
/// happened. It never sleeps except for the backoff between attempts.
///
/// `execute` only returns `Err` for requests rejected before any network
/// activity; every sent request yields a [`ResponseOutcome`] whose
/// [`Disposition`] and stored error describe the result.
///
/// # Example
///
/// ```rust,no_run
/// use demoblaze_core::http::{RequestExecutor, RequestSpec, Session, SessionConfig};
/// use demoblaze_core::retry::RetryPolicy;
///
/// # async fn demo() -> demoblaze_core::error::Result<()> {
/// let session = Session::new(SessionConfig::new("https://api.demoblaze.com"))?;
/// let executor = RequestExecutor::new(session, RetryPolicy::default())?;
///
/// let outcome = executor.execute(&RequestSpec::get("/entries")).await?;
/// println!("{} after {} attempts", outcome.disposition, outcome.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    session: Session,
    policy: RetryPolicy,
    deadline: Option<Duration>,
}

impl RequestExecutor {
    /// Creates an executor from a session and retry policy.
    ///
    /// Policy validation warnings are logged rather than returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the retry policy fails validation.
    pub fn new(session: Session, policy: RetryPolicy) -> Result<Self> {
        let report = policy.validate()?;
        for warning in &report.warnings {
            warn!(warning = %warning, "Retry policy warning");
        }
        Ok(Self {
            session,
            policy,
            deadline: None,
        })
    }

    /// Caps the whole call: attempts, body reads and backoff sleeps
    /// together must finish within `deadline`.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the underlying session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the retry policy in effect.
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Executes the request, retrying per policy, until a terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the spec or deadline is rejected
    /// before anything is sent. All later failures are reported through
    /// the returned [`ResponseOutcome`].
    #[instrument(
        name = "http_execute",
        skip(self, spec),
        fields(method = %spec.method, path = %spec.path)
    )]
    pub async fn execute(&self, spec: &RequestSpec) -> Result<ResponseOutcome> {
        spec.validate()?;
        if let Some(deadline) = self.deadline
            && deadline.is_zero()
        {
            return Err(Error::validation("call deadline must be greater than zero"));
        }

        let started = Instant::now();
        let mut history: Vec<AttemptRecord> = Vec::new();
        let mut attempt: u32 = 1;

        loop {
            let per_attempt = self.session.effective_timeout(spec);
            let attempt_timeout = match self.remaining(started) {
                Some(remaining) if remaining.is_zero() => {
                    return Ok(self.deadline_outcome(spec, attempt - 1, None, history, started));
                }
                Some(remaining) => per_attempt.min(remaining),
                None => per_attempt,
            };

            let attempt_started = Instant::now();
            match self.session.send_with_timeout(spec, attempt_timeout).await {
                Ok(raw) => {
                    let status = raw.status;
                    if status < 400 || spec.accept_statuses.contains(&status) {
                        history.push(AttemptRecord {
                            attempt,
                            status: Some(status),
                            error: None,
                            duration: raw.elapsed,
                            delay_before_next: None,
                        });
                        info!(
                            attempts = attempt,
                            status,
                            elapsed_ms = %started.elapsed().as_millis(),
                            "Request completed"
                        );
                        return Ok(Self::outcome(
                            Disposition::Success,
                            Some(raw),
                            attempt,
                            history,
                            started.elapsed(),
                            None,
                        ));
                    }

                    if self.policy.should_retry_status(status, attempt) {
                        let delay = self.retry_delay_for(&raw, attempt);
                        if !self.delay_fits(started, delay) {
                            history.push(AttemptRecord {
                                attempt,
                                status: Some(status),
                                error: None,
                                duration: raw.elapsed,
                                delay_before_next: None,
                            });
                            warn!(
                                attempt,
                                status,
                                delay_ms = %delay.as_millis(),
                                "Backoff would overrun the call deadline, giving up"
                            );
                            return Ok(self.deadline_outcome(
                                spec,
                                attempt,
                                Some(raw),
                                history,
                                started,
                            ));
                        }

                        warn!(
                            attempt,
                            status,
                            delay_ms = %delay.as_millis(),
                            "Retryable status, backing off"
                        );
                        history.push(AttemptRecord {
                            attempt,
                            status: Some(status),
                            error: None,
                            duration: raw.elapsed,
                            delay_before_next: Some(delay),
                        });
                        sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    history.push(AttemptRecord {
                        attempt,
                        status: Some(status),
                        error: None,
                        duration: raw.elapsed,
                        delay_before_next: None,
                    });
                    let (disposition, err) = self.classify_status(&raw, attempt);
                    error!(
                        attempts = attempt,
                        status,
                        disposition = %disposition,
                        error = %err,
                        "Request failed"
                    );
                    return Ok(Self::outcome(
                        disposition,
                        Some(raw),
                        attempt,
                        history,
                        started.elapsed(),
                        Some(err),
                    ));
                }
                Err(transport_err) => {
                    let duration = attempt_started.elapsed();

                    if self.policy.should_retry_transport(&transport_err, attempt) {
                        let delay = self.policy.retry_delay(attempt);
                        if !self.delay_fits(started, delay) {
                            history.push(AttemptRecord {
                                attempt,
                                status: None,
                                error: Some(transport_err.to_string()),
                                duration,
                                delay_before_next: None,
                            });
                            warn!(
                                attempt,
                                error = %transport_err,
                                delay_ms = %delay.as_millis(),
                                "Backoff would overrun the call deadline, giving up"
                            );
                            return Ok(self.deadline_outcome(spec, attempt, None, history, started));
                        }

                        warn!(
                            attempt,
                            error = %transport_err,
                            kind = transport_err.kind(),
                            delay_ms = %delay.as_millis(),
                            "Transport failure, backing off"
                        );
                        history.push(AttemptRecord {
                            attempt,
                            status: None,
                            error: Some(transport_err.to_string()),
                            duration,
                            delay_before_next: Some(delay),
                        });
                        sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    history.push(AttemptRecord {
                        attempt,
                        status: None,
                        error: Some(transport_err.to_string()),
                        duration,
                        delay_before_next: None,
                    });
                    let err = Error::from(transport_err);
                    error!(attempts = attempt, error = %err, "Request failed");
                    return Ok(Self::outcome(
                        Disposition::TransportFailure,
                        None,
                        attempt,
                        history,
                        started.elapsed(),
                        Some(err),
                    ));
                }
            }
        }
    }

    /// Delay before the next attempt, honoring `Retry-After` on 429/503.
    fn retry_delay_for(&self, raw: &RawResponse, attempt: u32) -> Duration {
        if matches!(raw.status, 429 | 503)
            && let Some(seconds) = raw.retry_after()
        {
            debug!(retry_after_s = seconds, "Using server-provided Retry-After delay");
            return self.policy.clamp_retry_after(seconds);
        }
        self.policy.retry_delay(attempt)
    }

    fn classify_status(&self, raw: &RawResponse, attempts: u32) -> (Disposition, Error) {
        let status = raw.status;
        let message = status_message(raw);
        if (500..600).contains(&status) {
            (Disposition::ServerError, Error::server(status, message))
        } else if self.policy.is_retryable_status(status) {
            (
                Disposition::PolicyExhausted,
                Error::policy_exhausted(attempts, format!("HTTP {status}: {message}")),
            )
        } else {
            (Disposition::ClientError, Error::client(status, message))
        }
    }

    fn remaining(&self, started: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_sub(started.elapsed()))
    }

    fn delay_fits(&self, started: Instant, delay: Duration) -> bool {
        match self.deadline {
            Some(deadline) => started.elapsed() + delay < deadline,
            None => true,
        }
    }

    fn deadline_outcome(
        &self,
        spec: &RequestSpec,
        attempts: u32,
        last: Option<RawResponse>,
        history: Vec<AttemptRecord>,
        started: Instant,
    ) -> ResponseOutcome {
        let context = match self.deadline {
            Some(deadline) => format!(
                "call deadline of {deadline:?} expired after {attempts} attempts ({})",
                spec.label()
            ),
            None => format!(
                "call deadline expired after {attempts} attempts ({})",
                spec.label()
            ),
        };
        let err = Error::timed_out().context(context);
        error!(attempts, error = %err, "Request failed");
        Self::outcome(
            Disposition::TransportFailure,
            last,
            attempts,
            history,
            started.elapsed(),
            Some(err),
        )
    }

    fn outcome(
        disposition: Disposition,
        raw: Option<RawResponse>,
        attempts: u32,
        history: Vec<AttemptRecord>,
        elapsed: Duration,
        error: Option<Error>,
    ) -> ResponseOutcome {
        let (status, headers, body) = match raw {
            Some(raw) => (Some(raw.status), raw.headers, raw.body),
            None => (None, HeaderMap::new(), Vec::new()),
        };
        ResponseOutcome {
            disposition,
            status,
            headers,
            body,
            attempts,
            elapsed,
            history,
            error,
        }
    }
}

/// Body text when present, otherwise the canonical status reason.
fn status_message(raw: &RawResponse) -> String {
    let text = raw.body_text();
    if text.trim().is_empty() {
        StatusCode::from_u16(raw.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("no response body")
            .to_string()
    } else {
        text.into_owned()
    }
}
