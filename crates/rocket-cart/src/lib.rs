//! Client-side shopping cart for the RocketShoes storefront.
//!
//! `CartStore` owns the ordered list of line items, mirrors it to a
//! key-value store after every successful change, and checks the remote
//! stock service before raising a quantity. Failures never reach the caller
//! as values; each one is reported once through a [`Notifier`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_cart::prelude::*;
//!
//! let catalog = Arc::new(HttpCatalog::new("http://localhost:3333", TimeoutConfig::default())?);
//! let storage = Arc::new(FileStore::open(".rocket/cart.json")?);
//! let (notifier, mut toasts) = ChannelNotifier::new();
//! let store = CartStore::load(catalog, storage, Arc::new(notifier), DEFAULT_CART_KEY);
//!
//! store.add_product(ProductId::new(1)).await;
//! while let Ok(error) = toasts.try_recv() {
//!     eprintln!("{}", error);
//! }
//! store.update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3)).await;
//! println!("{} items", store.cart().item_count());
//! ```

mod error;
mod notify;
mod snapshot;
mod store;

pub use error::CartError;
pub use notify::{ChannelNotifier, Notifier};
pub use snapshot::{CartSnapshot, DEFAULT_CART_KEY};
pub use store::{CartStore, UpdateProductAmount};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartError, CartSnapshot, CartStore, ChannelNotifier, Notifier, UpdateProductAmount,
        DEFAULT_CART_KEY,
    };
    pub use rocket_cache::{FileStore, KeyValueStore, MemoryStore};
    pub use rocket_commerce::prelude::*;
    pub use rocket_data::{Catalog, HttpCatalog, TimeoutConfig};
}
