//! End-to-end purchase journeys against a mock backend.
//!
//! Each journey drives the full facade surface in order: account setup,
//! catalog browsing, cart assembly, and order placement. The mock responses
//! are sequenced to mirror the backend's cart lifecycle (filled before the
//! order, empty after).

use crate::common::{catalog_fixture, mock_store, mount_accepting_post, mount_catalog, mount_login};
use crate::{assert_cart_products, assert_valid_product};
use demoblaze_rust::{Category, OrderForm};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_full_purchase_journey() {
    let server = MockServer::start().await;
    let store = mock_store(&server.uri());
    let cookie = store.cart_cookie().to_string();

    mount_accepting_post(&server, "/signup").await;
    mount_login(&server, "am9hbi1zZXNzaW9u").await;
    mount_catalog(&server).await;
    mount_accepting_post(&server, "/addtocart").await;
    mount_accepting_post(&server, "/purchaseorder").await;

    // The cart is reported filled until the order lands, then empty.
    Mock::given(method("POST"))
        .and(path("/viewcart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [
                {"cookie": cookie, "id": "line-phone", "prod_id": 1},
                {"cookie": cookie, "id": "line-laptop", "prod_id": 8}
            ]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/viewcart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Items": []})))
        .mount(&server)
        .await;

    // Account setup
    store.sign_up("journey_user", "Journey!123").await.unwrap();
    store.login("journey_user", "Journey!123").await.unwrap();
    assert!(store.is_authenticated().await);

    // Catalog browsing
    let products = store.fetch_products().await.unwrap();
    assert_eq!(products.len(), 3);
    for product in &products {
        assert_valid_product!(product);
    }

    let phones = store
        .fetch_products_by_category(Category::Phones)
        .await
        .unwrap();
    let laptops = store
        .fetch_products_by_category(Category::Laptops)
        .await
        .unwrap();
    let phone = &phones[0];
    let laptop = &laptops[0];
    assert_eq!(phone.price, dec!(360));
    assert_eq!(laptop.price, dec!(790));

    // Cart assembly
    store.add_to_cart(phone.id).await.unwrap();
    store.add_to_cart(laptop.id).await.unwrap();

    let cart = store.view_cart().await.unwrap();
    assert_cart_products!(cart, [phone.id, laptop.id]);

    // Order placement; the backend expects a whole-dollar total.
    let total = (phone.price + laptop.price).to_u32().unwrap();
    store
        .place_order(&OrderForm {
            name: "Jordan Reyes".to_string(),
            country: "Portugal".to_string(),
            city: "Lisbon".to_string(),
            card: "4111111111111111".to_string(),
            month: "12".to_string(),
            year: "2027".to_string(),
            total,
        })
        .await
        .unwrap();

    let cart_after = store.view_cart().await.unwrap();
    assert!(cart_after.is_empty(), "Cart should be empty after the order");
}

#[tokio::test]
async fn test_cart_cleanup_journey() {
    let server = MockServer::start().await;
    let store = mock_store(&server.uri());
    let cookie = store.cart_cookie().to_string();

    mount_accepting_post(&server, "/addtocart").await;

    Mock::given(method("POST"))
        .and(path("/viewcart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [{"cookie": cookie, "id": "line-to-remove", "prod_id": 10}]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/viewcart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Items": []})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/deleteitem"))
        .and(body_json(json!({"cookie": cookie, "id": "line-to-remove"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    store.add_to_cart(10).await.unwrap();

    let cart = store.view_cart().await.unwrap();
    assert_eq!(cart.len(), 1);
    let line_id = cart.items[0].id.clone();

    store.delete_cart_item(&line_id).await.unwrap();

    let cart_after = store.view_cart().await.unwrap();
    assert!(cart_after.is_empty());
}

#[tokio::test]
async fn test_journey_survives_transient_failures() {
    let server = MockServer::start().await;
    let store = mock_store(&server.uri());

    // First catalog request and first cart mutation each hit a 503 before
    // the backend recovers.
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_fixture()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/addtocart"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_accepting_post(&server, "/addtocart").await;

    let products = store.fetch_products().await.unwrap();
    assert_eq!(products.len(), 3);

    store.add_to_cart(products[0].id).await.unwrap();
}
