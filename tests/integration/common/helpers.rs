//! Integration test helpers.
//!
//! Test setup, store client factories, mock fixtures, and data generators
//! shared by the mock and live suites.

// Allow clippy warnings for test helper code
#![allow(clippy::disallowed_methods)]
#![allow(dead_code)]

use anyhow::{Context, Result as AnyhowResult};
use demoblaze_rust::test_config::TestConfig;
use demoblaze_rust::{StoreClient, StoreClientBuilder};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Load the test configuration, falling back to defaults on error.
pub fn init_test_config() -> TestConfig {
    TestConfig::from_env().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: could not load test configuration: {e}, using defaults");
        TestConfig::default()
    })
}

/// Create a store client pointed at a mock server, tuned for fast retries.
pub fn mock_store(uri: &str) -> StoreClient {
    StoreClientBuilder::new()
        .base_url(uri)
        .timeout(Duration::from_secs(5))
        .retry_delay(Duration::from_millis(10))
        .build()
        .expect("client should build against a mock URI")
}

/// Create a store client for the live suite, honoring the URL override and
/// credentials from the test configuration.
pub fn create_live_store(config: &TestConfig) -> AnyhowResult<StoreClient> {
    StoreClient::new(config.store_config()).context("Failed to create store client")
}

/// Generate a username that is unique per invocation.
///
/// Live account tests must register fresh users; the backend never expires
/// them.
pub fn unique_username() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("rs_user_{}", &hex[..12])
}

/// Catalog fixture with one product per category.
pub fn catalog_fixture() -> serde_json::Value {
    json!({
        "Items": [
            {
                "cat": "phone",
                "desc": "The Samsung Galaxy S6 is powered by 1.5GHz octa-core",
                "id": 1,
                "img": "imgs/galaxy_s6.jpg",
                "price": 360,
                "title": "Samsung galaxy s6"
            },
            {
                "cat": "notebook",
                "desc": "Sony is so confident that the VAIO will last",
                "id": 8,
                "img": "imgs/vaio_i5.jpg",
                "price": 790,
                "title": "Sony vaio i5"
            },
            {
                "cat": "monitor",
                "desc": "23.6-inch LED backlit LCD monitor",
                "id": 10,
                "img": "imgs/asus_monitor.jpg",
                "price": 230,
                "title": "ASUS Full HD"
            }
        ],
        "LastEvaluatedKey": {"id": "10"}
    })
}

/// Mount the catalog fixture on `GET /entries`.
pub async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_fixture()))
        .mount(server)
        .await;
}

/// Mount an empty 200 response on a POST endpoint.
///
/// Matches the backend's habit of answering mutations with a bare 200.
pub async fn mount_accepting_post(server: &MockServer, endpoint: &str) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Mount a login endpoint that hands out the given token.
pub async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(format!("Auth_token: {token}")))
        .mount(server)
        .await;
}
