//! DemoBlaze API constants.
//!
//! Endpoint paths used by the storefront operations. All endpoints hang
//! directly off the API root and most take POST with a JSON body, including
//! the read-only ones.

/// API endpoints.
pub mod endpoints {
    /// Full product catalog.
    pub const ENTRIES: &str = "entries";
    /// Single product lookup by id.
    pub const VIEW: &str = "view";
    /// Add a line to a cart.
    pub const ADD_TO_CART: &str = "addtocart";
    /// Cart contents for a cookie.
    pub const VIEW_CART: &str = "viewcart";
    /// Remove a line from a cart.
    pub const DELETE_ITEM: &str = "deleteitem";
    /// Account registration.
    pub const SIGNUP: &str = "signup";
    /// Account login.
    pub const LOGIN: &str = "login";
    /// Order placement.
    pub const PURCHASE_ORDER: &str = "purchaseorder";
}
