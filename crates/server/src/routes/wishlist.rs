//! Wishlist read and toggle handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::shopify::{ToggleAction, WishlistStore, toggle};
use crate::state::AppState;

/// Response for a wishlist read.
#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    /// Product identifiers on the wishlist, in insertion order.
    pub wishlist: Vec<String>,
}

/// Request body for a wishlist toggle.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    /// Product identifier to add or remove.
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
}

/// Response for a wishlist toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Whether the product ended up added or removed.
    pub action: ToggleAction,
    /// The wishlist after the toggle.
    pub wishlist: Vec<String>,
}

/// Read a customer's wishlist.
///
/// Customers with no metafield (or an unknown ID) read as an empty list.
///
/// # Errors
///
/// Returns an error if the Shopify query fails.
pub async fn get_wishlist<S: WishlistStore>(
    State(state): State<AppState<S>>,
    Path(customer_id): Path<String>,
) -> Result<Json<WishlistResponse>> {
    let wishlist = state.store().fetch_wishlist(&customer_id).await?;
    Ok(Json(WishlistResponse { wishlist }))
}

/// Toggle a product identifier on a customer's wishlist.
///
/// Reads the current list, flips membership of `productId`, and writes the
/// result back. The read-modify-write cycle has no mutual exclusion; when two
/// toggles for the same customer race, the second write wins.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if `productId` is missing (nothing is
/// written in that case), or an error if either Shopify round-trip fails.
pub async fn toggle_wishlist<S: WishlistStore>(
    State(state): State<AppState<S>>,
    Path(customer_id): Path<String>,
    body: Bytes,
) -> Result<Json<ToggleResponse>> {
    // An empty or malformed body reads the same as a missing productId.
    let product_id = serde_json::from_slice::<ToggleRequest>(&body)
        .ok()
        .and_then(|b| b.product_id)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("productId required".to_string()))?;

    let current = state.store().fetch_wishlist(&customer_id).await?;
    let (action, wishlist) = toggle(current, &product_id);
    state.store().save_wishlist(&customer_id, &wishlist).await?;

    tracing::info!(
        customer_id = %customer_id,
        product_id = %product_id,
        action = ?action,
        "Wishlist toggled"
    );

    Ok(Json(ToggleResponse {
        success: true,
        action,
        wishlist,
    }))
}
