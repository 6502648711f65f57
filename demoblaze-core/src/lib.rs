//! DemoBlaze Core Library
//!
//! Resilient HTTP plumbing for exercising JSON APIs: a pooled
//! [`Session`](http::Session), declarative [`RequestSpec`](http::RequestSpec)s,
//! and a [`RequestExecutor`](http::RequestExecutor) that retries transient
//! failures with exponential backoff and reports every call as a classified
//! [`ResponseOutcome`](http::ResponseOutcome).
//!
//! # Features
//!
//! - **Outcome over exception**: sent requests always produce an outcome
//!   describing what happened, attempt by attempt
//! - **Tunable resilience**: retry budget, backoff curve and jitter are one
//!   [`RetryPolicy`](retry::RetryPolicy) value
//! - **Structured logging**: every attempt and terminal result is traced
//!   with `tracing`
//! - **Secret hygiene**: credentials ride in zeroizing, redacted wrappers
//!
//! # Example
//!
//! ```rust,no_run
//! use demoblaze_core::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let session = Session::new(SessionConfig::new("https://api.demoblaze.com"))?;
//! let executor = RequestExecutor::new(session, RetryPolicy::default())?;
//!
//! let outcome = executor.execute(&RequestSpec::get("/entries")).await?;
//! println!("{} in {} attempts", outcome.disposition, outcome.attempts);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Global suppressions, each broad enough that local annotations would
// outnumber the code they decorate:
// - module_name_repetitions: RetryPolicy in retry, SessionConfig in http
// - missing_errors_doc / missing_panics_doc: not every Result-returning
//   helper carries a full doc section
// - must_use_candidate: not every getter needs #[must_use]
// - doc_markdown: DemoBlaze and similar names read fine without backticks
// - struct_excessive_bools: LogConfig is legitimately flag-shaped
// - too_many_lines: the executor loop reads better unsplit
// - return_self_not_must_use: builder-style setters return Self
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::return_self_not_must_use)]

// Re-exports of external dependencies
pub use serde;
pub use serde_json;

// Core modules
pub mod credentials;
pub mod error;
pub mod http;
pub mod logging;
pub mod retry;

// Re-exports of core types for convenience
pub use credentials::SecretString;
pub use error::{ContextExt, Error, Result};
pub use http::{
    AttemptRecord, Disposition, Method, RawResponse, RequestExecutor, RequestSpec,
    ResponseOutcome, Session, SessionConfig,
};
pub use retry::{DEFAULT_RETRYABLE_STATUSES, RetryPolicy};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```rust
/// use demoblaze_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::credentials::SecretString;
    pub use crate::error::{ConfigValidationError, ContextExt, Error, Result, TransportError};
    pub use crate::http::{
        AttemptRecord, Disposition, Method, RawResponse, RequestExecutor, RequestSpec,
        ResponseOutcome, Session, SessionConfig,
    };
    pub use crate::logging::{LogConfig, LogFormat, LogLevel, init_logging, try_init_logging};
    pub use crate::retry::{DEFAULT_RETRYABLE_STATUSES, RetryPolicy};
    pub use serde::{Deserialize, Serialize};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
