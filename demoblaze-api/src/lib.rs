//! DemoBlaze Storefront API
//!
//! Typed operations against the DemoBlaze demo store, built on the
//! retry-aware executor from `demoblaze-core`. One [`StoreClient`] owns its
//! transport session, cart cookie, and auth token, so parallel clients
//! exercise fully isolated server-side state.
//!
//! # Example
//!
//! ```rust,no_run
//! use demoblaze_api::prelude::*;
//!
//! # async fn example() -> demoblaze_core::Result<()> {
//! let store = StoreClient::builder().build()?;
//!
//! let phones = store.fetch_products_by_category(Category::Phones).await?;
//! store.add_to_cart(phones[0].id).await?;
//! let cart = store.view_cart().await?;
//! assert_eq!(cart.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Same global suppressions as demoblaze-core; see the rationale there.
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::return_self_not_must_use)]

// Re-exports of external dependencies
pub use demoblaze_core;
pub use rust_decimal;

pub mod config;
pub mod constants;
pub mod store;
pub mod types;

pub use config::{DEFAULT_BASE_URL, StoreConfig};
pub use store::{StoreClient, StoreClientBuilder};
pub use types::{Cart, CartItem, Category, OrderForm, Product};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```rust
/// use demoblaze_api::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::store::{StoreClient, StoreClientBuilder};
    pub use crate::types::{Cart, CartItem, Category, OrderForm, Product};
    pub use demoblaze_core::prelude::*;
    pub use rust_decimal::Decimal;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
