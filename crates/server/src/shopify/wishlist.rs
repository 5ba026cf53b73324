//! Wishlist operations over the customer metafield.
//!
//! A customer's wishlist is stored in one metafield as a JSON-encoded array
//! of product identifier strings. Shopify does not enforce uniqueness on the
//! stored value, so the toggle treats the list as a set for membership while
//! preserving insertion order for everything else.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ShopifyClient, ShopifyError};

/// Metafield namespace holding the wishlist.
pub const WISHLIST_NAMESPACE: &str = "custom";

/// Metafield key holding the wishlist.
pub const WISHLIST_KEY: &str = "wishlist_products";

/// Metafield type written back on every save.
pub const WISHLIST_METAFIELD_TYPE: &str = "list.single_line_text_field";

const GET_SHOP_QUERY: &str = r"
    {
        shop {
            name
        }
    }
";

const GET_CUSTOMER_QUERY: &str = r#"
    query getCustomer($id: ID!) {
        customer(id: $id) {
            id
            email
            metafield(namespace: "custom", key: "wishlist_products") {
                value
            }
        }
    }
"#;

const GET_WISHLIST_QUERY: &str = r#"
    query getWishlist($id: ID!) {
        customer(id: $id) {
            metafield(namespace: "custom", key: "wishlist_products") {
                value
            }
        }
    }
"#;

const UPDATE_WISHLIST_MUTATION: &str = r"
    mutation updateWishlist($input: CustomerInput!) {
        customerUpdate(input: $input) {
            customer {
                id
            }
            userErrors {
                field
                message
            }
        }
    }
";

/// Which way a toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    /// The product was not on the wishlist and was appended.
    Added,
    /// The product was on the wishlist and every occurrence was removed.
    Removed,
}

/// Toggle a product identifier's membership in a wishlist.
///
/// Membership is exact string equality. When present, all occurrences are
/// removed at once; when absent, the identifier is appended at the end.
/// The returned list therefore contains the identifier exactly 0 or 1 times.
#[must_use]
pub fn toggle(wishlist: Vec<String>, product_id: &str) -> (ToggleAction, Vec<String>) {
    if wishlist.iter().any(|id| id == product_id) {
        let next = wishlist.into_iter().filter(|id| id != product_id).collect();
        (ToggleAction::Removed, next)
    } else {
        let mut next = wishlist;
        next.push(product_id.to_string());
        (ToggleAction::Added, next)
    }
}

/// Decode a stored metafield value into a wishlist.
///
/// A missing value means the customer has no wishlist yet. A corrupt value
/// is deliberately treated as empty rather than failing the whole operation.
#[must_use]
pub fn parse_wishlist(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Corrupt wishlist metafield, treating as empty");
        Vec::new()
    })
}

/// Narrow interface between the HTTP surface and the system of record.
///
/// Implemented by [`ShopifyClient`] in production and by in-memory fakes in
/// router tests so handlers can be exercised without a network.
pub trait WishlistStore: Clone + Send + Sync + 'static {
    /// Round-trip a trivial shop query, returning the raw payload.
    fn fetch_shop(
        &self,
    ) -> impl Future<Output = Result<serde_json::Value, ShopifyError>> + Send;

    /// Fetch raw customer + wishlist metafield data for debugging.
    fn fetch_customer(
        &self,
        customer_id: &str,
    ) -> impl Future<Output = Result<serde_json::Value, ShopifyError>> + Send;

    /// Resolve a customer's wishlist, or empty if they have none.
    fn fetch_wishlist(
        &self,
        customer_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, ShopifyError>> + Send;

    /// Persist a wishlist into the customer's metafield.
    fn save_wishlist(
        &self,
        customer_id: &str,
        wishlist: &[String],
    ) -> impl Future<Output = Result<(), ShopifyError>> + Send;
}

#[derive(Debug, Deserialize)]
struct WishlistQueryData {
    customer: Option<CustomerNode>,
}

#[derive(Debug, Deserialize)]
struct CustomerNode {
    metafield: Option<MetafieldNode>,
}

#[derive(Debug, Deserialize)]
struct MetafieldNode {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CustomerUpdateData {
    #[serde(rename = "customerUpdate")]
    customer_update: Option<CustomerUpdatePayload>,
}

#[derive(Debug, Deserialize)]
struct CustomerUpdatePayload {
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserErrorNode>,
}

#[derive(Debug, Deserialize)]
struct UserErrorNode {
    field: Option<Vec<String>>,
    message: String,
}

impl WishlistStore for ShopifyClient {
    async fn fetch_shop(&self) -> Result<serde_json::Value, ShopifyError> {
        self.execute(GET_SHOP_QUERY, None).await
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn fetch_customer(&self, customer_id: &str) -> Result<serde_json::Value, ShopifyError> {
        let variables = serde_json::json!({ "id": customer_id });
        self.execute(GET_CUSTOMER_QUERY, Some(variables)).await
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn fetch_wishlist(&self, customer_id: &str) -> Result<Vec<String>, ShopifyError> {
        let variables = serde_json::json!({ "id": customer_id });
        let data: WishlistQueryData = self.execute(GET_WISHLIST_QUERY, Some(variables)).await?;

        // Unknown customer and missing metafield both read as empty.
        let raw = data
            .customer
            .and_then(|c| c.metafield)
            .and_then(|m| m.value);

        Ok(parse_wishlist(raw.as_deref()))
    }

    #[instrument(skip(self, wishlist), fields(customer_id = %customer_id, len = wishlist.len()))]
    async fn save_wishlist(
        &self,
        customer_id: &str,
        wishlist: &[String],
    ) -> Result<(), ShopifyError> {
        let value = serde_json::to_string(wishlist)?;
        let variables = serde_json::json!({
            "input": {
                "id": customer_id,
                "metafields": [
                    {
                        "namespace": WISHLIST_NAMESPACE,
                        "key": WISHLIST_KEY,
                        "type": WISHLIST_METAFIELD_TYPE,
                        "value": value,
                    }
                ],
            }
        });

        let data: CustomerUpdateData = self
            .execute(UPDATE_WISHLIST_MUTATION, Some(variables))
            .await?;

        if let Some(payload) = data.customer_update
            && !payload.user_errors.is_empty()
        {
            let error_messages: Vec<String> = payload
                .user_errors
                .iter()
                .map(|e| {
                    let field = e.field.as_ref().map_or_else(String::new, |f| f.join("."));
                    format!("{}: {}", field, e.message)
                })
                .collect();
            return Err(ShopifyError::UserError(error_messages.join("; ")));
        }

        Ok(())
    }
}
