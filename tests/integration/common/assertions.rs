//! Custom assertion macros for the integration suites.
//!
//! Validate the completeness and plausibility of data returned by the
//! storefront API, with messages that name the offending field.

// Allow clippy warnings for test helper code
#![allow(dead_code)]
#![allow(unused_imports)]

use rust_decimal::Decimal;

/// Validate the completeness and plausibility of a product.
#[macro_export]
macro_rules! assert_valid_product {
    ($product:expr) => {{
        let product = &$product;

        assert!(product.id > 0, "Product id should be positive");
        assert!(
            !product.title.trim().is_empty(),
            "Product title should not be blank"
        );
        assert!(
            product.price > rust_decimal::Decimal::ZERO,
            "Product price should be positive: {} priced {}",
            product.title,
            product.price
        );
        assert!(
            demoblaze_rust::Category::all().contains(&product.category),
            "Product category should be a known category"
        );

        println!("✓ Product validation passed for '{}'", product.title);
    }};
}

/// Validate that every product in a list belongs to one category.
#[macro_export]
macro_rules! assert_all_in_category {
    ($products:expr, $category:expr) => {{
        for product in &$products {
            assert_eq!(
                product.category, $category,
                "Product '{}' should be in category {}",
                product.title, $category
            );
        }
    }};
}

/// Validate that a cart holds exactly the given product ids, in any order.
#[macro_export]
macro_rules! assert_cart_products {
    ($cart:expr, $expected:expr) => {{
        let cart = &$cart;
        let mut actual: Vec<u64> = cart.items.iter().map(|item| item.prod_id).collect();
        let mut expected: Vec<u64> = $expected.to_vec();
        actual.sort_unstable();
        expected.sort_unstable();
        assert_eq!(
            actual, expected,
            "Cart should hold exactly the expected products"
        );

        for item in &cart.items {
            assert!(
                !item.id.trim().is_empty(),
                "Cart line for product {} should carry a server-generated id",
                item.prod_id
            );
        }
    }};
}
