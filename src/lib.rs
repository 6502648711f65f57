//! # DemoBlaze Rust
//!
//! A resilient HTTP test client for the DemoBlaze demo storefront, split in
//! two layers:
//!
//! - [`demoblaze_core`]: pooled HTTP session, declarative request specs, and
//!   a retry executor that classifies every call into a [`ResponseOutcome`]
//! - [`demoblaze_api`]: typed storefront operations (catalog, account, cart,
//!   orders) with per-instance session state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use demoblaze_rust::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = StoreClient::builder().build()?;
//!
//!     let phones = store.fetch_products_by_category(Category::Phones).await?;
//!     store.add_to_cart(phones[0].id).await?;
//!     println!("{} lines in cart", store.view_cart().await?.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Re-export the transport core
pub use demoblaze_core::{
    ContextExt, Error, Method, RequestExecutor, RequestSpec, ResponseOutcome, Result, RetryPolicy,
    SecretString, Session, SessionConfig,
};

// Re-export the storefront facade
pub use demoblaze_api::{
    Cart, CartItem, Category, OrderForm, Product, StoreClient, StoreClientBuilder, StoreConfig,
};

// Test configuration for the integration suites
pub mod test_config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use demoblaze_api::prelude::*;
}
