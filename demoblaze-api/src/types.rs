//! Typed models for the DemoBlaze storefront.
//!
//! These mirror the JSON shapes the backend actually returns. Prices come
//! back as JSON numbers and are held as [`Decimal`] so comparisons and sums
//! stay exact.

use demoblaze_core::Error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product category as shown in the storefront UI.
///
/// The backend stores categories under different names than the UI displays
/// (`phone`, `notebook`, `monitor`); [`Category::api_value`] returns the
/// stored form, [`fmt::Display`] the UI form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Mobile phones (`phone` on the wire).
    #[serde(rename = "phone")]
    Phones,
    /// Laptops (`notebook` on the wire).
    #[serde(rename = "notebook")]
    Laptops,
    /// Monitors (`monitor` on the wire).
    #[serde(rename = "monitor")]
    Monitors,
}

impl Category {
    /// Returns the category name as stored by the backend.
    #[must_use]
    pub fn api_value(self) -> &'static str {
        match self {
            Self::Phones => "phone",
            Self::Laptops => "notebook",
            Self::Monitors => "monitor",
        }
    }

    /// All known categories, in storefront display order.
    #[must_use]
    pub fn all() -> [Self; 3] {
        [Self::Phones, Self::Laptops, Self::Monitors]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Phones => "phones",
            Self::Laptops => "laptops",
            Self::Monitors => "monitors",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts both the UI form (`phones`) and the stored form (`phone`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phone" | "phones" => Ok(Self::Phones),
            "notebook" | "laptop" | "laptops" => Ok(Self::Laptops),
            "monitor" | "monitors" => Ok(Self::Monitors),
            other => Err(Error::validation(format!("unknown category '{other}'"))),
        }
    }
}

/// A storefront product as returned by `entries` and `view`.
///
/// # Example
///
/// ```rust
/// use demoblaze_api::types::{Category, Product};
///
/// let product: Product = serde_json::from_str(
///     r#"{"id":1,"title":"Samsung galaxy s6","price":360,"cat":"phone",
///         "desc":"The Samsung Galaxy S6","img":"imgs/galaxy_s6.jpg"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(product.category, Category::Phones);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Numeric product id, unique across the catalog.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Unit price in USD.
    pub price: Decimal,
    /// Category the product is listed under.
    #[serde(rename = "cat")]
    pub category: Category,
    /// Marketing description.
    #[serde(rename = "desc", default)]
    pub description: String,
    /// Relative path of the product image.
    #[serde(rename = "img", default)]
    pub image: String,
}

/// One cart line as returned by `viewcart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Server-generated line id, needed to delete the line again.
    pub id: String,
    /// Id of the product the line holds.
    pub prod_id: u64,
    /// Session cookie the line is bound to.
    #[serde(default)]
    pub cookie: String,
}

/// Cart contents for one session cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    /// Cart lines in the order the backend returned them.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any line holds the given product.
    #[must_use]
    pub fn contains_product(&self, product_id: u64) -> bool {
        self.item_for_product(product_id).is_some()
    }

    /// Returns the first line holding the given product.
    #[must_use]
    pub fn item_for_product(&self, product_id: u64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.prod_id == product_id)
    }
}

/// Customer and payment details for `purchaseorder`.
///
/// The backend validates none of these fields, so defaults are empty; callers
/// fill in what their scenario needs. Month and year are free-form strings on
/// the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderForm {
    /// Customer name.
    pub name: String,
    /// Billing country.
    pub country: String,
    /// Billing city.
    pub city: String,
    /// Card number.
    pub card: String,
    /// Card expiration month.
    pub month: String,
    /// Card expiration year.
    pub year: String,
    /// Order total in whole USD.
    pub total: u32,
}
