//! Shared helpers and assertions for the integration suites.

pub mod assertions;
pub mod helpers;

// Re-export the common items
#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use helpers::*;
