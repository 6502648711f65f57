//! Store integration tests against a wiremock backend.
//!
//! This suite exercises full purchase journeys and concurrent client
//! behavior without touching the real DemoBlaze service.

#![allow(clippy::disallowed_methods)]

// Shared helpers and assertion macros
#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/store/test_purchase_journey.rs"]
mod test_purchase_journey;

#[path = "integration/store/test_concurrent_clients.rs"]
mod test_concurrent_clients;
