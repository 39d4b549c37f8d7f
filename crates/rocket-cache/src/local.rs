//! Browser `localStorage` adapter.

use crate::{CacheError, KeyValueStore};

/// A `KeyValueStore` over `window.localStorage`.
///
/// The storage handle is looked up on every call, so the adapter holds no
/// JS values and stays `Send + Sync`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    /// Create the adapter.
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<web_sys::Storage, CacheError> {
        web_sys::window()
            .ok_or_else(|| CacheError::OpenError("no window".to_string()))?
            .local_storage()
            .map_err(|e| CacheError::OpenError(format!("{:?}", e)))?
            .ok_or_else(|| CacheError::OpenError("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }
}
