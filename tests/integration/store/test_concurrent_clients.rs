//! Concurrency behavior of the store client.
//!
//! Each client owns an independent cart cookie, so clients running in
//! parallel must never observe each other's cart lines. A single client is
//! also safe to share across tasks behind an `Arc`.

use crate::common::{mock_store, mount_catalog};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_parallel_clients_keep_carts_isolated() {
    let server = MockServer::start().await;

    let mut stores = Vec::new();
    for product_id in 1..=4u64 {
        let store = mock_store(&server.uri());
        let cookie = store.cart_cookie().to_string();

        Mock::given(method("POST"))
            .and(path("/addtocart"))
            .and(body_json(json!({
                "id": cookie,
                "cookie": cookie,
                "prod_id": product_id,
                "flag": true
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/viewcart"))
            .and(body_json(json!({"cookie": cookie, "flag": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Items": [
                    {"cookie": cookie, "id": format!("line-{product_id}"), "prod_id": product_id}
                ]
            })))
            .mount(&server)
            .await;

        stores.push((store, product_id));
    }

    let cookies: HashSet<String> = stores
        .iter()
        .map(|(store, _)| store.cart_cookie().to_string())
        .collect();
    assert_eq!(cookies.len(), 4, "Every client should mint its own cookie");

    let mut handles = Vec::new();
    for (store, product_id) in stores {
        handles.push(tokio::spawn(async move {
            store.add_to_cart(product_id).await.unwrap();

            let cart = store.view_cart().await.unwrap();
            assert_eq!(cart.len(), 1);
            assert!(
                cart.contains_product(product_id),
                "Client should only see its own cart line"
            );
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_shared_client_serves_concurrent_reads() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let store = Arc::new(mock_store(&server.uri()));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let products = store.fetch_products().await.unwrap();
            assert_eq!(products.len(), 3);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
}
