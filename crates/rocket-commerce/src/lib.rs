//! Storefront domain types for RocketCart.
//!
//! This crate holds the plain data the cart core works with:
//!
//! - **Catalog**: `Product` master data and `StockRecord` availability
//! - **Cart**: the ordered `LineItem` sequence and its pure transformations
//!
//! Nothing here performs I/O. Lookups live in `rocket-data`, persistence in
//! `rocket-cache`, and the stateful store in `rocket-cart`.
//!
//! # Example
//!
//! ```rust
//! use rocket_commerce::prelude::*;
//!
//! let product = Product::new(ProductId::new(1), "Running Shoe", 179.9, "shoe.jpg");
//! let cart = Cart::new().with_appended(product).unwrap();
//! assert_eq!(cart.item_count(), 1);
//! ```

pub mod cart;
pub mod error;
pub mod ids;
pub mod product;

pub use cart::{Cart, LineItem};
pub use error::CommerceError;
pub use ids::ProductId;
pub use product::{Product, StockRecord};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, LineItem};
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::product::{Product, StockRecord};
}
