//! Tests against the real DemoBlaze backend.
//!
//! Disabled by default; set `ENABLE_LIVE_TESTS=true` (for example in a
//! `.env` file) to run them. Account tests register a throwaway user per
//! run, and the cart test cleans up after itself.

use crate::common::{create_live_store, init_test_config, unique_username};
use crate::{assert_all_in_category, assert_valid_product};
use demoblaze_rust::{Category, skip_if};

const LIVE_TESTS_DISABLED: &str = "Live API tests disabled (set ENABLE_LIVE_TESTS=true)";

#[tokio::test]
async fn test_live_catalog_lists_products() {
    let config = init_test_config();
    skip_if!(config.should_skip_live_tests(), LIVE_TESTS_DISABLED);

    let store = create_live_store(&config).unwrap();
    let products = store.fetch_products().await.unwrap();

    assert!(!products.is_empty(), "Catalog should not be empty");
    for product in products.iter().take(5) {
        assert_valid_product!(product);
    }
}

#[tokio::test]
async fn test_live_product_lookup_matches_catalog() {
    let config = init_test_config();
    skip_if!(config.should_skip_live_tests(), LIVE_TESTS_DISABLED);

    let store = create_live_store(&config).unwrap();
    let products = store.fetch_products().await.unwrap();
    let listed = &products[0];

    let fetched = store.fetch_product(listed.id).await.unwrap();
    assert_eq!(fetched.id, listed.id);
    assert_eq!(fetched.title, listed.title);
    assert_eq!(fetched.price, listed.price);
}

#[tokio::test]
async fn test_live_category_filter() {
    let config = init_test_config();
    skip_if!(config.should_skip_live_tests(), LIVE_TESTS_DISABLED);

    let store = create_live_store(&config).unwrap();
    for category in Category::all() {
        let products = store.fetch_products_by_category(category).await.unwrap();
        assert!(
            !products.is_empty(),
            "Category {category} should have products"
        );
        assert_all_in_category!(products, category);
    }
}

#[tokio::test]
async fn test_live_health_check() {
    let config = init_test_config();
    skip_if!(config.should_skip_live_tests(), LIVE_TESTS_DISABLED);

    let store = create_live_store(&config).unwrap();
    assert!(store.check_health().await, "Backend should be reachable");
}

#[tokio::test]
async fn test_live_account_registration_and_login() {
    let config = init_test_config();
    skip_if!(config.should_skip_live_tests(), LIVE_TESTS_DISABLED);

    let store = create_live_store(&config).unwrap();
    let username = unique_username();
    let password = "SecurePass!42";

    store.sign_up(&username, password).await.unwrap();
    store.login(&username, password).await.unwrap();

    assert!(store.is_authenticated().await);
    let token = store.auth_token().await.unwrap();
    assert!(!token.expose_secret().is_empty());
}

#[tokio::test]
async fn test_live_configured_credentials_login() {
    let config = init_test_config();
    skip_if!(config.should_skip_live_tests(), LIVE_TESTS_DISABLED);
    demoblaze_rust::require_credentials!(config);

    let store = create_live_store(&config).unwrap();
    let (username, password) = config.credentials().unwrap();

    store.login(username, password).await.unwrap();
    assert!(store.is_authenticated().await);
}

#[tokio::test]
async fn test_live_cart_round_trip() {
    let config = init_test_config();
    skip_if!(config.should_skip_live_tests(), LIVE_TESTS_DISABLED);

    let store = create_live_store(&config).unwrap();
    let products = store.fetch_products().await.unwrap();
    let product = &products[0];

    store.add_to_cart(product.id).await.unwrap();

    let cart = store.view_cart().await.unwrap();
    assert!(
        cart.contains_product(product.id),
        "Cart should hold the product just added"
    );

    // Leave the shared backend the way we found it.
    for item in &cart.items {
        store.delete_cart_item(&item.id).await.unwrap();
    }
    let cart_after = store.view_cart().await.unwrap();
    assert!(cart_after.is_empty());
}
