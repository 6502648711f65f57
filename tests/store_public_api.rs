//! Live DemoBlaze API integration tests.
//!
//! Every test in this suite is gated on `ENABLE_LIVE_TESTS`; without the
//! flag the tests print a skip notice and pass.

#![allow(clippy::disallowed_methods)]

#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/store/test_live_api.rs"]
mod test_live_api;
