//! DemoBlaze storefront tour.
//!
//! Walks the full store facade against the real backend: health check,
//! catalog browsing, account registration, cart assembly, and checkout.
//! Configuration (base URL, timeouts, retry tuning) is read from the
//! environment; see [`StoreConfig`](demoblaze_rust::StoreConfig).

use anyhow::{Context, Result};
use demoblaze_core::logging::{LogConfig, init_logging};
use demoblaze_rust::{Category, OrderForm, StoreClient};
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging system
    // Use development config for demos (Debug level, Pretty format)
    init_logging(&LogConfig::development());

    println!("=== DemoBlaze Storefront Tour ===\n");

    let store = StoreClient::from_env().context("Failed to create store client")?;
    println!("Cart cookie for this run: {}\n", store.cart_cookie());

    // Example 1: Health check
    println!("1. Checking backend health...");
    if store.check_health().await {
        println!("   Backend is reachable");
    } else {
        println!("   Backend is unreachable, the remaining steps will likely fail");
    }
    println!();

    // Example 2: Fetch the full catalog
    println!("2. Fetching catalog...");
    match store.fetch_products().await {
        Ok(products) => {
            println!("   Found {} products", products.len());
            if let Some(product) = products.first() {
                println!(
                    "   Example product: {} (#{}) at ${} [{}]",
                    product.title, product.id, product.price, product.category
                );
            }
        }
        Err(e) => println!("   Error: {}", e),
    }
    println!();

    // Example 3: Browse by category
    println!("3. Browsing by category...");
    for category in Category::all() {
        match store.fetch_products_by_category(category).await {
            Ok(products) => println!("   {}: {} products", category, products.len()),
            Err(e) => println!("   {}: error: {}", category, e),
        }
    }
    println!();

    // Example 4: Look up a single product
    // Product #1 is the first phone in the stock DemoBlaze catalog.
    println!("4. Fetching product #1...");
    let mut order_total = 360;
    match store.fetch_product(1).await {
        Ok(product) => {
            println!("   Title: {}", product.title);
            println!("   Price: ${}", product.price);
            println!("   Category: {}", product.category);
            if let Some(total) = product.price.to_u32() {
                order_total = total;
            }
        }
        Err(e) => println!("   Error: {}", e),
    }
    println!();

    // Example 5: Register a throwaway account and log in
    let username = format!("tour_user_{}", Uuid::new_v4().simple());
    println!("5. Registering account '{}'...", username);
    match store.sign_up(&username, "TourPass!42").await {
        Ok(()) => println!("   Registered"),
        Err(e) => println!("   Error: {}", e),
    }
    match store.login(&username, "TourPass!42").await {
        Ok(()) => {
            println!("   Logged in: {}", store.is_authenticated().await);
            if let Some(token) = store.auth_token().await {
                // The debug form never reveals the token itself.
                println!("   Session token (debug): {:?}", token);
            }
        }
        Err(e) => println!("   Error: {}", e),
    }
    println!();

    // Example 6: Put the product in the cart
    println!("6. Adding product #1 to the cart...");
    match store.add_to_cart(1).await {
        Ok(()) => println!("   Added"),
        Err(e) => println!("   Error: {}", e),
    }
    match store.view_cart().await {
        Ok(cart) => {
            println!("   Cart holds {} line(s)", cart.len());
            for item in &cart.items {
                println!("   Line {}: product #{}", item.id, item.prod_id);
            }
        }
        Err(e) => println!("   Error: {}", e),
    }
    println!();

    // Example 7: Check out
    println!("7. Placing the order...");
    let order = OrderForm {
        name: "Tour Customer".to_string(),
        country: "Portugal".to_string(),
        city: "Lisbon".to_string(),
        card: "4111111111111111".to_string(),
        month: "12".to_string(),
        year: "2027".to_string(),
        total: order_total,
    };
    match store.place_order(&order).await {
        Ok(()) => println!("   Order placed for ${}", order.total),
        Err(e) => println!("   Error: {}", e),
    }
    println!();

    store.clear_session().await;
    println!("=== Tour complete ===");

    Ok(())
}
