//! HTTP route handlers for the wishlist relay.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Health check
//! GET  /api/health                          - Health check (legacy prefix)
//!
//! # Diagnostics
//! GET  /test-shopify                        - Round-trip a trivial shop query
//! GET  /test-customer/:id                   - Raw customer + metafield data
//!
//! # Wishlist
//! GET  /wishlist/:customer_id               - Read a customer's wishlist
//! POST /wishlist/toggle/:customer_id        - Toggle a product on the wishlist
//! POST /api/wishlist/toggle/:customer_id    - Toggle (legacy prefix)
//! ```
//!
//! The `/api`-prefixed routes mirror the unprefixed ones; earlier deployments
//! served the toggle and health endpoints under `/api` and the storefront
//! still calls both shapes.

pub mod diagnostics;
pub mod wishlist;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::shopify::WishlistStore;
use crate::state::AppState;

/// Build the full application router.
pub fn router<S: WishlistStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/health", get(health))
        .route("/test-shopify", get(diagnostics::test_shopify::<S>))
        .route("/test-customer/{id}", get(diagnostics::test_customer::<S>))
        .route("/wishlist/{customer_id}", get(wishlist::get_wishlist::<S>))
        .route(
            "/wishlist/toggle/{customer_id}",
            post(wishlist::toggle_wishlist::<S>),
        )
        .route(
            "/api/wishlist/toggle/{customer_id}",
            post(wishlist::toggle_wishlist::<S>),
        )
}

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Static status message.
    pub status: &'static str,
}

/// Liveness health check endpoint.
///
/// Returns a static payload and performs no network calls.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "wishlist relay running",
    })
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::test_store::FakeStore;
    use crate::state::AppState;

    #[tokio::test]
    async fn test_health_returns_static_status() {
        for path in ["/health", "/api/health"] {
            let app = super::router().with_state(AppState::new(FakeStore::default()));

            let response = app
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = response.into_body().collect().await.unwrap().to_bytes();
            let json: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["status"], "wishlist relay running");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = super::router().with_state(AppState::new(FakeStore::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
