//! Application state shared across handlers.

use std::sync::Arc;

use crate::shopify::WishlistStore;

/// Application state shared across all handlers.
///
/// Generic over the wishlist backend so router tests can substitute an
/// in-memory fake for the Shopify client. Cheaply cloneable via `Arc`.
pub struct AppState<S: WishlistStore> {
    inner: Arc<AppStateInner<S>>,
}

impl<S: WishlistStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AppStateInner<S> {
    store: S,
}

impl<S: WishlistStore> AppState<S> {
    /// Create a new application state around a wishlist backend.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Get a reference to the wishlist backend.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.inner.store
    }
}
