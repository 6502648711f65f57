//! Catalog operations: product listing, lookup, and the health probe.

use super::{StoreClient, parser};
use crate::constants::endpoints;
use crate::types::{Category, Product};
use demoblaze_core::{Error, RequestSpec, Result};
use serde_json::json;
use tracing::{debug, error};

impl StoreClient {
    /// Fetches the full product catalog.
    ///
    /// # Returns
    ///
    /// All listed products in backend order. Catalog rows that fail to parse
    /// are logged and skipped rather than failing the call.
    ///
    /// # Errors
    ///
    /// Returns an error when the call fails after retries or the body does
    /// not carry a parsable `Items` envelope.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use demoblaze_api::store::StoreClient;
    /// # async fn example() -> demoblaze_core::Result<()> {
    /// let store = StoreClient::builder().build()?;
    /// for product in store.fetch_products().await? {
    ///     println!("{}: ${}", product.title, product.price);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        let body = self.call(RequestSpec::get(endpoints::ENTRIES)).await?;
        parser::parse_items(&body)
    }

    /// Fetches a single product by id.
    ///
    /// The backend answers `null` for unknown ids; that maps to an
    /// invalid-request error rather than an empty product.
    ///
    /// # Errors
    ///
    /// Returns a validation error for id 0 without touching the network, an
    /// invalid-request error for unknown ids, and a decode error for bodies
    /// of the wrong shape.
    pub async fn fetch_product(&self, product_id: u64) -> Result<Product> {
        if product_id == 0 {
            return Err(Error::validation("product id must be positive"));
        }

        let spec = RequestSpec::post(endpoints::VIEW).with_json(json!({ "id": product_id }));
        let body = self.call(spec).await?;

        if let Some(message) = parser::error_message(&body) {
            return Err(Error::invalid_request(message));
        }
        parser::parse_product(&body)?
            .ok_or_else(|| Error::invalid_request(format!("product {product_id} does not exist")))
    }

    /// Fetches the products listed under one storefront category.
    ///
    /// The backend has no category endpoint, so this fetches the whole
    /// catalog and filters locally.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`fetch_products`](Self::fetch_products).
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use demoblaze_api::store::StoreClient;
    /// # use demoblaze_api::types::Category;
    /// # async fn example() -> demoblaze_core::Result<()> {
    /// let store = StoreClient::builder().build()?;
    /// let laptops = store.fetch_products_by_category(Category::Laptops).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_products_by_category(&self, category: Category) -> Result<Vec<Product>> {
        let mut products = self.fetch_products().await?;
        products.retain(|product| product.category == category);
        debug!(%category, count = products.len(), "Filtered catalog by category");
        Ok(products)
    }

    /// Reports whether the backend answers catalog requests.
    ///
    /// Never fails: transport errors and HTTP failures both map to `false`.
    pub async fn check_health(&self) -> bool {
        let spec = RequestSpec::get(endpoints::ENTRIES);
        match self.executor.execute(&spec).await {
            Ok(outcome) => outcome.is_success(),
            Err(e) => {
                error!(error = %e, "Health check failed before reaching the backend");
                false
            }
        }
    }
}
