//! DemoBlaze storefront facade.
//!
//! [`StoreClient`] bundles a pooled transport session, a retry policy, and
//! the per-instance session state (cart cookie, auth token) behind typed
//! storefront operations. Operations are grouped by concern:
//!
//! - Catalog: [`fetch_products`](StoreClient::fetch_products),
//!   [`fetch_product`](StoreClient::fetch_product),
//!   [`fetch_products_by_category`](StoreClient::fetch_products_by_category),
//!   [`check_health`](StoreClient::check_health)
//! - Account: [`sign_up`](StoreClient::sign_up), [`login`](StoreClient::login),
//!   [`clear_session`](StoreClient::clear_session)
//! - Cart: [`add_to_cart`](StoreClient::add_to_cart),
//!   [`view_cart`](StoreClient::view_cart),
//!   [`delete_cart_item`](StoreClient::delete_cart_item)
//! - Orders: [`place_order`](StoreClient::place_order)
//!
//! Every operation validates its inputs before touching the network, runs
//! through the shared retry executor, and parses the response body into a
//! typed result.

mod account;
mod builder;
mod cart;
mod catalog;
mod orders;
pub mod parser;

pub use builder::StoreClientBuilder;

use crate::config::StoreConfig;
use demoblaze_core::{RequestExecutor, RequestSpec, Result, SecretString, Session};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Typed client for the DemoBlaze storefront API.
///
/// Each instance carries its own cart cookie and (after [`login`]) its own
/// auth token, so independent instances never share server-side state. The
/// client is cheap to share behind an `Arc`; all operations take `&self`.
///
/// # Example
///
/// ```no_run
/// # use demoblaze_api::store::StoreClient;
/// # async fn example() -> demoblaze_core::Result<()> {
/// let store = StoreClient::builder().build()?;
/// let products = store.fetch_products().await?;
/// println!("{} products on sale", products.len());
/// # Ok(())
/// # }
/// ```
///
/// [`login`]: StoreClient::login
#[derive(Debug)]
pub struct StoreClient {
    config: StoreConfig,
    executor: RequestExecutor,
    cookie: String,
    token: RwLock<Option<SecretString>>,
}

impl StoreClient {
    /// Creates a builder with production defaults.
    #[must_use]
    pub fn builder() -> StoreClientBuilder {
        StoreClientBuilder::new()
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL, timeouts, or retry
    /// tuning fail validation, or a transport error if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let session = Session::new(config.session_config())?;
        let executor = RequestExecutor::new(session, config.retry_policy())?;

        Ok(Self {
            config,
            executor,
            cookie: format!("user_{}", Uuid::new_v4().simple()),
            token: RwLock::new(None),
        })
    }

    /// Creates a client from environment variables.
    ///
    /// See [`StoreConfig::from_env`] for the recognized variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the resulting
    /// configuration is invalid.
    pub fn from_env() -> Result<Self> {
        Self::new(StoreConfig::from_env()?)
    }

    /// Returns the configuration the client was built from.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the underlying request executor.
    #[must_use]
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Returns the cart cookie generated for this instance.
    ///
    /// The cookie identifies the server-side cart; two clients never share
    /// one.
    #[must_use]
    pub fn cart_cookie(&self) -> &str {
        &self.cookie
    }

    /// Returns the configured test credentials when both halves are present.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &SecretString)> {
        match (&self.config.username, &self.config.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password)),
            _ => None,
        }
    }

    /// Executes a request and returns the body of an accepted response.
    async fn call(&self, spec: RequestSpec) -> Result<String> {
        let outcome = self.executor.execute(&spec).await?.into_success()?;
        Ok(outcome.text().into_owned())
    }
}
