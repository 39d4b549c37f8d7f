//! Catalog and stock lookups with dependency tagging and timeouts.
//!
//! This crate provides:
//! - `Catalog` - The lookup seam the cart core depends on
//! - `HttpCatalog` - `Catalog` over the storefront REST API
//! - `DependencyTag` - Semantic dependency categories
//! - `TimeoutConfig` - Per-dependency timeouts

mod client;
mod dependency;
mod timeout;

pub use client::*;
pub use dependency::*;
pub use timeout::*;
