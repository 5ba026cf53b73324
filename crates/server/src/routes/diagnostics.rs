//! Connectivity diagnostics against the Shopify Admin API.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::error::Result;
use crate::shopify::WishlistStore;
use crate::state::AppState;

/// Round-trip a trivial shop-name query to confirm connectivity.
///
/// # Errors
///
/// Returns an error if the Shopify query fails.
pub async fn test_shopify<S: WishlistStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<serde_json::Value>> {
    let data = state.store().fetch_shop().await?;
    Ok(Json(data))
}

/// Fetch raw customer + wishlist metafield data for a given identifier.
///
/// # Errors
///
/// Returns an error if the Shopify query fails.
pub async fn test_customer<S: WishlistStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let data = state.store().fetch_customer(&id).await?;
    Ok(Json(data))
}
