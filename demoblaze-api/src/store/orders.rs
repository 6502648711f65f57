//! Order placement.

use super::{StoreClient, parser};
use crate::constants::endpoints;
use crate::types::OrderForm;
use demoblaze_core::{Error, RequestSpec, Result};
use serde_json::json;
use tracing::info;

impl StoreClient {
    /// Places an order for the current cart contents.
    ///
    /// The backend charges nothing and validates little; it accepts the
    /// order as long as the required identifiers are present and clears the
    /// cart bound to this client's cookie.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the customer name or card number is
    /// blank, without touching the network, and an invalid-request error
    /// when the backend rejects the order.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use demoblaze_api::store::StoreClient;
    /// # use demoblaze_api::types::OrderForm;
    /// # async fn example() -> demoblaze_core::Result<()> {
    /// let store = StoreClient::builder().build()?;
    /// store.add_to_cart(8).await?;
    /// store
    ///     .place_order(&OrderForm {
    ///         name: "Jordan Reyes".to_string(),
    ///         card: "4111111111111111".to_string(),
    ///         total: 790,
    ///         ..OrderForm::default()
    ///     })
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn place_order(&self, order: &OrderForm) -> Result<()> {
        if order.name.trim().is_empty() {
            return Err(Error::validation("customer name must not be empty"));
        }
        if order.card.trim().is_empty() {
            return Err(Error::validation("card number must not be empty"));
        }

        let spec = RequestSpec::post(endpoints::PURCHASE_ORDER).with_json(json!({
            "id": self.cookie,
            "cookie": self.cookie,
            "name": order.name,
            "country": order.country,
            "city": order.city,
            "card": order.card,
            "month": order.month,
            "year": order.year,
            "total": order.total,
        }));
        let body = self.call(spec).await?;

        if let Some(message) = parser::error_message(&body) {
            return Err(Error::invalid_request(message));
        }
        info!(total = order.total, "Order placed");
        Ok(())
    }
}
