//! Error taxonomy for the resilient test client.
//!
//! ## Variants
//!
//! ```text
//! Error
//! ├── Validation          - bad input, rejected before any network call
//! ├── Transport           - failure below the HTTP layer (TransportError)
//! ├── Client              - final non-retryable 4xx answer
//! ├── Server              - final 5xx answer after retries were exhausted
//! ├── PolicyExhausted     - retryable outcome but the attempt budget ran out
//! ├── Decode              - 2xx answer whose body could not be decoded (DecodeError)
//! ├── Config              - invalid configuration (ConfigValidationError)
//! ├── Authentication      - backend rejected the credentials in-band
//! ├── InvalidRequest      - backend rejected the request in-band
//! └── Context             - any of the above wrapped with an operation description
//! ```
//!
//! The split between `Client`/`Server` and `Transport` matters for test
//! reporting: the former mean the system under test answered (a legitimate
//! assertion target), the latter means the harness never completed the call
//! (an environment problem).
//!
//! ## Quick Start
//!
//! ```rust
//! use demoblaze_core::error::{Error, Result, ContextExt};
//!
//! fn place_order(order_total: u32) -> Result<()> {
//!     if order_total == 0 {
//!         return Err(Error::validation("order total must be positive"));
//!     }
//!
//!     submit(order_total)
//!         .with_context(|| format!("Failed to place order for {}", order_total))?;
//!
//!     Ok(())
//! }
//! # fn submit(_: u32) -> Result<()> { Ok(()) }
//! ```
//!
//! ### Branching on the failure
//!
//! ```rust
//! use demoblaze_core::error::Error;
//!
//! fn triage(err: &Error) {
//!     if err.is_retryable() {
//!         println!("transient, retrying may help");
//!     }
//!     if let Some(status) = err.status() {
//!         println!("backend answered with HTTP {status}");
//!     }
//!     println!("{}", err.report());
//! }
//! ```
//!
//! ## Size
//!
//! The enum stays at or under 56 bytes on 64-bit targets: `Transport`,
//! `Decode`, `Config` and `Context` box their payloads, and message fields
//! are `Cow<'static, str>` so constructors called with a `&'static str`
//! allocate nothing. Reach for `format!` only when the message really is
//! dynamic.
//!
//! ## Integration with anyhow
//!
//! `Error` implements `std::error::Error`, so `?` lifts it straight into
//! `anyhow::Result` in demo binaries and test helpers:
//!
//! ```rust
//! use demoblaze_core::error::Error;
//!
//! fn app_main() -> anyhow::Result<()> {
//!     let result: Result<(), Error> = Err(Error::validation("username must not be empty"));
//!     result?;
//!     Ok(())
//! }
//! ```

mod config;
mod context;
mod convert;
mod decode;
mod transport;

use std::borrow::Cow;
use std::error::Error as StdError;

use thiserror::Error;

pub use config::{ConfigValidationError, ValidationResult};
pub use context::ContextExt;
pub use decode::DecodeError;
pub use transport::TransportError;

pub(crate) use convert::truncate_message;

/// Result type alias for all client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type for the `demoblaze` client crates.
///
/// Boxed payloads and `Cow<'static, str>` messages hold the enum at 56
/// bytes or less on 64-bit targets, so passing it by value through the
/// retry loop stays cheap.
///
/// # Example
///
/// ```rust
/// use demoblaze_core::error::Error;
///
/// let err = Error::validation("username must not be empty");
/// assert!(err.to_string().contains("username"));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input rejected before any network activity took place.
    #[error("Validation error: {0}")]
    Validation(Cow<'static, str>),

    /// Failure below the HTTP layer, possibly after exhausting retries.
    /// Transparent so `report()` can walk into the transport error's own
    /// source chain.
    #[error(transparent)]
    Transport(Box<TransportError>),

    /// Final non-retryable 4xx answer from the backend.
    #[error("Client error (HTTP {status}): {message}")]
    Client {
        /// HTTP status code
        status: u16,
        /// Response body excerpt or status reason
        message: String,
    },

    /// Final 5xx answer after the retry budget was spent.
    #[error("Server error (HTTP {status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body excerpt or status reason
        message: String,
    },

    /// A retryable outcome kept recurring until the attempt budget ran out.
    #[error("Retry budget exhausted after {attempts} attempts: {message}")]
    PolicyExhausted {
        /// Attempts performed before giving up
        attempts: u32,
        /// Description of the last outcome
        message: String,
    },

    /// Successful status whose body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(Box<DecodeError>),

    /// Invalid configuration detected at construction time.
    #[error("Configuration error: {0}")]
    Config(Box<ConfigValidationError>),

    /// Backend rejected the supplied credentials in-band.
    #[error("Authentication error: {0}")]
    Authentication(Cow<'static, str>),

    /// Backend rejected the request in-band (HTTP 200 with an error payload).
    #[error("Invalid request: {0}")]
    InvalidRequest(Cow<'static, str>),

    /// Any other variant wrapped with a description of the failed operation.
    #[error("{context}")]
    Context {
        /// What was being attempted
        context: String,
        /// The wrapped failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    // ==================== Constructor Methods ====================

    /// Creates a validation error.
    /// Takes `&'static str` without allocating; `String` works too.
    pub fn validation(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a client error from a final 4xx answer.
    pub fn client(status: u16, message: impl Into<String>) -> Self {
        Self::Client {
            status,
            message: truncate_message(message.into()),
        }
    }

    /// Creates a server error from a final 5xx answer.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: truncate_message(message.into()),
        }
    }

    /// Creates a policy exhaustion error.
    pub fn policy_exhausted(attempts: u32, message: impl Into<String>) -> Self {
        Self::PolicyExhausted {
            attempts,
            message: truncate_message(message.into()),
        }
    }

    /// Creates an authentication error from an in-band backend rejection.
    pub fn authentication(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Creates an invalid-request error from an in-band backend rejection.
    pub fn invalid_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Creates an error from a bare message when no richer variant applies.
    pub fn generic(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Creates a transport error from a connection failure message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(Box::new(TransportError::ConnectionFailed(msg.into())))
    }

    /// Creates a transport error for an expired attempt or call deadline.
    #[must_use]
    pub fn timed_out() -> Self {
        Self::Transport(Box::new(TransportError::TimedOut))
    }

    // ==================== Context Methods ====================

    /// Wraps the error with a description of the operation that failed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use demoblaze_core::error::Error;
    ///
    /// let err = Error::transport("Connection refused")
    ///     .context("Failed to fetch product catalog");
    /// ```
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    // ==================== Chain Traversal Methods ====================

    /// Walks from the outermost error through every Context layer.
    fn iter_chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| match err {
            Error::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }

    /// Strips every Context layer and returns the innermost error.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        self.iter_chain().last().unwrap_or(self)
    }

    /// Searches the chain, Context layers included, for an error matching
    /// the predicate.
    pub fn find_variant<F>(&self, matcher: F) -> Option<&Error>
    where
        F: Fn(&Error) -> bool,
    {
        self.iter_chain().find(|e| matcher(e))
    }

    /// Renders the error and its full cause chain, one cause per line.
    ///
    /// # Example
    ///
    /// ```rust
    /// use demoblaze_core::error::Error;
    ///
    /// let err = Error::transport("Connection refused")
    ///     .context("Failed to fetch product catalog");
    /// println!("{}", err.report());
    /// // Output:
    /// // Failed to fetch product catalog
    /// // Caused by: Connection failed: Connection refused
    /// ```
    #[must_use]
    pub fn report(&self) -> String {
        use std::fmt::Write;
        let mut report = String::new();
        report.push_str(&self.to_string());

        let mut current: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(err) = current {
            let _ = write!(report, "\nCaused by: {err}");
            current = err.source();
        }
        report
    }

    // ==================== Helper Methods (Context Penetrating) ====================

    /// Checks if retrying the whole call could plausibly change the outcome
    /// (penetrates Context layers).
    ///
    /// Returns `true` for:
    /// - `Transport` with a retryable kind (connection failure, timeout)
    /// - `Server` (5xx answers are transient by assumption)
    /// - `PolicyExhausted` (the outcome was retryable, the budget was not)
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(te) => te.is_retryable(),
            Error::Server { .. } | Error::PolicyExhausted { .. } => true,
            Error::Context { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Returns the HTTP status if the backend answered (penetrates Context layers).
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Client { status, .. } | Error::Server { status, .. } => Some(*status),
            Error::Context { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The validation message, seen through any Context layers.
    #[must_use]
    pub fn as_validation(&self) -> Option<&str> {
        match self {
            Error::Validation(msg) => Some(msg.as_ref()),
            Error::Context { source, .. } => source.as_validation(),
            _ => None,
        }
    }

    /// The authentication message, seen through any Context layers.
    #[must_use]
    pub fn as_authentication(&self) -> Option<&str> {
        match self {
            Error::Authentication(msg) => Some(msg.as_ref()),
            Error::Context { source, .. } => source.as_authentication(),
            _ => None,
        }
    }

    /// The inner [`DecodeError`], seen through any Context layers.
    #[must_use]
    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Error::Decode(de) => Some(de.as_ref()),
            Error::Context { source, .. } => source.as_decode(),
            _ => None,
        }
    }
}
