//! Live integration tests against a running wishlist relay.
//!
//! These tests require:
//! - The relay running (cargo run -p wishlist-relay-server)
//! - Valid Shopify credentials in environment
//! - A throwaway customer ID in `TEST_CUSTOMER_ID`
//!
//! They mutate real metafield data, so they only run when explicitly asked:
//! cargo test -p wishlist-relay-server -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the relay (configurable via environment).
fn base_url() -> String {
    std::env::var("RELAY_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Customer GID used for mutating tests.
fn test_customer_id() -> String {
    std::env::var("TEST_CUSTOMER_ID").expect("TEST_CUSTOMER_ID must be set for live tests")
}

#[tokio::test]
#[ignore = "Requires running relay server"]
async fn test_health() {
    let resp = Client::new()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach relay");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse health body");
    assert!(body["status"].is_string());
}

#[tokio::test]
#[ignore = "Requires running relay server and Shopify credentials"]
async fn test_shopify_connectivity() {
    let resp = Client::new()
        .get(format!("{}/test-shopify", base_url()))
        .send()
        .await
        .expect("Failed to reach relay");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse shop body");
    assert!(body["shop"]["name"].is_string());
}

#[tokio::test]
#[ignore = "Requires running relay server and Shopify credentials"]
async fn test_toggle_round_trip() {
    let client = Client::new();
    let base = base_url();
    let customer_id = test_customer_id();
    let product_id = "gid://shopify/Product/1";

    let before: Value = client
        .get(format!("{base}/wishlist/{customer_id}"))
        .send()
        .await
        .expect("Failed to read wishlist")
        .json()
        .await
        .expect("Failed to parse wishlist");

    // Toggle twice; the wishlist must come back to its starting state.
    let mut actions = Vec::new();
    for _ in 0..2 {
        let resp = client
            .post(format!("{base}/wishlist/toggle/{customer_id}"))
            .json(&json!({ "productId": product_id }))
            .send()
            .await
            .expect("Failed to toggle wishlist");

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.expect("Failed to parse toggle body");
        assert_eq!(body["success"], true);
        actions.push(body["action"].as_str().map(String::from));
    }

    // One add and one remove, in whichever order the starting state dictates.
    assert_ne!(actions.first(), actions.last());

    let after: Value = client
        .get(format!("{base}/wishlist/{customer_id}"))
        .send()
        .await
        .expect("Failed to read wishlist")
        .json()
        .await
        .expect("Failed to parse wishlist");

    assert_eq!(before["wishlist"], after["wishlist"]);
}

#[tokio::test]
#[ignore = "Requires running relay server"]
async fn test_toggle_without_product_id() {
    let resp = Client::new()
        .post(format!("{}/wishlist/toggle/{}", base_url(), "123"))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to reach relay");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "productId required");
}
