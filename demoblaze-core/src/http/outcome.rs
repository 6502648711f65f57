use std::borrow::Cow;
use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Number of body bytes included in log records and previews.
pub(crate) const BODY_PREVIEW_SIZE: usize = 200;

/// Raw result of a single completed HTTP exchange.
///
/// "Completed" means a status line and body were read; whether the status
/// represents success is decided by the caller.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response headers.
    pub headers: HeaderMap,

    /// Raw response body.
    pub body: Vec<u8>,

    /// Time from sending the request until the body was fully read.
    pub elapsed: Duration,
}

impl RawResponse {
    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns the first [`BODY_PREVIEW_SIZE`] bytes of the body as text,
    /// suitable for log records.
    #[must_use]
    pub fn body_preview(&self) -> String {
        let end = self.body.len().min(BODY_PREVIEW_SIZE);
        String::from_utf8_lossy(&self.body[..end]).to_string()
    }

    /// Parses the `Retry-After` header as delta seconds.
    ///
    /// The HTTP-date form of the header is not supported and reads as
    /// `None`, falling back to computed backoff.
    #[must_use]
    pub fn retry_after(&self) -> Option<u64> {
        self.headers
            .get(RETRY_AFTER)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()
    }
}

/// Terminal classification of an executed request.
///
/// Exactly one disposition applies to every finished call, so matching on
/// it is exhaustive without catch-all arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Final status below 400, or one the request explicitly accepted.
    Success,
    /// Final non-retryable 4xx status.
    ClientError,
    /// Final 5xx status, after retries where the code was retryable.
    ServerError,
    /// No usable response: connection failure, timeout, TLS failure, or an
    /// expired call deadline.
    TransportFailure,
    /// A retryable non-5xx status (e.g. 429) kept recurring until the
    /// attempt budget ran out.
    PolicyExhausted,
}

impl Disposition {
    /// Returns a stable lower-case name, used in log records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Disposition::Success => "success",
            Disposition::ClientError => "client_error",
            Disposition::ServerError => "server_error",
            Disposition::TransportFailure => "transport_failure",
            Disposition::PolicyExhausted => "policy_exhausted",
        }
    }
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened during one attempt of the retry loop.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// 1-based attempt number.
    pub attempt: u32,

    /// Status code, when a response was received.
    pub status: Option<u16>,

    /// Short transport failure description, when no response was received.
    pub error: Option<String>,

    /// How long the attempt took.
    pub duration: Duration,

    /// Backoff slept after this attempt, `None` on the final attempt.
    pub delay_before_next: Option<Duration>,
}

/// Everything known about a finished request: the final response (if any),
/// how it was classified, and the full attempt history.
///
/// The `error` field is populated exactly when `disposition` is not
/// [`Disposition::Success`], so callers that only care about pass/fail can
/// use [`into_success`](Self::into_success) and the `?` operator.
#[derive(Debug)]
pub struct ResponseOutcome {
    /// Terminal classification.
    pub disposition: Disposition,

    /// Status code of the last completed exchange, `None` when every
    /// attempt failed below the HTTP layer.
    pub status: Option<u16>,

    /// Headers of the last completed exchange, empty otherwise.
    pub headers: HeaderMap,

    /// Body of the last completed exchange, empty otherwise.
    pub body: Vec<u8>,

    /// Attempts performed, including the final one.
    pub attempts: u32,

    /// Wall-clock time across all attempts and backoff sleeps.
    pub elapsed: Duration,

    /// Per-attempt breakdown, oldest first.
    pub history: Vec<AttemptRecord>,

    /// The failure, when the call did not succeed.
    pub error: Option<Error>,
}

impl ResponseOutcome {
    /// Returns `true` when the call was classified as a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.disposition == Disposition::Success
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Converts the outcome into a plain `Result`, surfacing the stored
    /// failure for non-success dispositions.
    ///
    /// # Errors
    ///
    /// Returns the stored error when the call did not succeed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use demoblaze_core::error::Result;
    /// # use demoblaze_core::http::ResponseOutcome;
    /// # fn demo(outcome: ResponseOutcome) -> Result<()> {
    /// let outcome = outcome.into_success()?;
    /// let products: serde_json::Value = outcome.json()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_success(mut self) -> Result<Self> {
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}
