//! Resilient HTTP request layer
//!
//! Splits a call into three pieces that can be reasoned about separately:
//! - [`Session`]: pooled connections, base URL, default headers
//! - [`RequestSpec`]: one request described as plain data
//! - [`RequestExecutor`]: the retry loop producing a [`ResponseOutcome`]
//!
//! # Example
//!
//! ```rust,no_run
//! use demoblaze_core::http::{RequestExecutor, RequestSpec, Session, SessionConfig};
//! use demoblaze_core::retry::RetryPolicy;
//!
//! # async fn demo() -> demoblaze_core::error::Result<()> {
//! let session = Session::new(SessionConfig::new("https://api.demoblaze.com"))?;
//! let executor = RequestExecutor::new(session, RetryPolicy::default())?;
//!
//! let outcome = executor.execute(&RequestSpec::get("/entries")).await?;
//! if outcome.is_success() {
//!     println!("catalog: {}", outcome.text());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Retry**: exponential backoff with jitter, driven by [`RetryPolicy`](crate::retry::RetryPolicy)
//! - **Deadline**: optional cap over all attempts and backoff sleeps
//! - **Size limits**: responses above the configured limit are aborted
//! - **Attempt history**: every outcome records what each attempt did

mod config;
mod executor;
mod outcome;
mod session;
mod spec;

pub use config::SessionConfig;
pub use executor::RequestExecutor;
pub use outcome::{AttemptRecord, Disposition, RawResponse, ResponseOutcome};
pub use session::Session;
pub use spec::{Method, RequestSpec};
