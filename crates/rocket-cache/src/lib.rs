//! Type-safe key-value persistence for RocketCart.
//!
//! Provides a small `KeyValueStore` abstraction over string values and a
//! `Cache` wrapper that adds automatic JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use rocket_cache::{Cache, MemoryStore};
//! use std::sync::Arc;
//!
//! let cache = Cache::new(Arc::new(MemoryStore::new()));
//!
//! cache.set("cart", &vec![1, 2, 3]).unwrap();
//! let cart: Option<Vec<u32>> = cache.get("cart").unwrap();
//! assert_eq!(cart, Some(vec![1, 2, 3]));
//! ```

mod error;
mod file;
mod kv;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod local;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use local::LocalStorage;
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
