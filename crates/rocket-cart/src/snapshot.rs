//! Persisted cart snapshot.

use std::sync::Arc;

use rocket_cache::{Cache, CacheError, KeyValueStore};
use rocket_commerce::{Cart, LineItem};
use tracing::{debug, warn};

/// Storage key used by the storefront front-end.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// The whole cart, serialized as a JSON array under a single key.
#[derive(Clone)]
pub struct CartSnapshot {
    cache: Cache,
    key: String,
}

impl CartSnapshot {
    /// Bind a snapshot to `key` in `storage`.
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(storage),
            key: key.into(),
        }
    }

    /// Storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted cart.
    ///
    /// A missing, unreadable, or unparsable snapshot yields an empty cart.
    pub fn load(&self) -> Cart {
        match self.cache.get::<Vec<LineItem>>(&self.key) {
            Ok(Some(items)) => {
                let cart = Cart::from_items(items);
                debug!(key = %self.key, items = cart.len(), "cart snapshot loaded");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding unreadable cart snapshot");
                Cart::new()
            }
        }
    }

    /// Overwrite the persisted cart.
    pub fn save(&self, cart: &Cart) -> Result<(), CacheError> {
        self.cache.set(&self.key, cart)
    }
}
