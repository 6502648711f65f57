//! Cart operations, all keyed by this client's cart cookie.

use super::{StoreClient, parser};
use crate::constants::endpoints;
use crate::types::Cart;
use demoblaze_core::{Error, RequestSpec, Result};
use serde_json::json;
use tracing::info;

impl StoreClient {
    /// Adds one unit of a product to this client's cart.
    ///
    /// # Errors
    ///
    /// Returns a validation error for id 0 without touching the network, and
    /// an invalid-request error when the backend rejects the line.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use demoblaze_api::store::StoreClient;
    /// # async fn example() -> demoblaze_core::Result<()> {
    /// let store = StoreClient::builder().build()?;
    /// store.add_to_cart(1).await?;
    /// let cart = store.view_cart().await?;
    /// assert!(cart.contains_product(1));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add_to_cart(&self, product_id: u64) -> Result<()> {
        if product_id == 0 {
            return Err(Error::validation("product id must be positive"));
        }

        let spec = RequestSpec::post(endpoints::ADD_TO_CART).with_json(json!({
            "id": self.cookie,
            "cookie": self.cookie,
            "prod_id": product_id,
            "flag": true,
        }));
        let body = self.call(spec).await?;

        if let Some(message) = parser::error_message(&body) {
            return Err(Error::invalid_request(message));
        }
        info!(product_id, "Added product to cart");
        Ok(())
    }

    /// Fetches the current cart contents.
    ///
    /// # Errors
    ///
    /// Returns an error when the call fails after retries, the backend
    /// rejects the cookie, or the body does not carry a parsable `Items`
    /// envelope.
    pub async fn view_cart(&self) -> Result<Cart> {
        let spec = RequestSpec::post(endpoints::VIEW_CART)
            .with_json(json!({ "cookie": self.cookie, "flag": true }));
        let body = self.call(spec).await?;

        if let Some(message) = parser::error_message(&body) {
            return Err(Error::invalid_request(message));
        }
        let items = parser::parse_items(&body)?;
        Ok(Cart { items })
    }

    /// Removes one cart line.
    ///
    /// Takes the server-generated line id from
    /// [`CartItem::id`](crate::types::CartItem), not a product id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank id without touching the
    /// network, and an invalid-request error when the backend rejects the
    /// deletion.
    pub async fn delete_cart_item(&self, item_id: &str) -> Result<()> {
        if item_id.trim().is_empty() {
            return Err(Error::validation("cart item id must not be empty"));
        }

        let spec = RequestSpec::post(endpoints::DELETE_ITEM)
            .with_json(json!({ "cookie": self.cookie, "id": item_id }));
        let body = self.call(spec).await?;

        if let Some(message) = parser::error_message(&body) {
            return Err(Error::invalid_request(message));
        }
        info!(item_id, "Removed cart line");
        Ok(())
    }
}
