//! Catalog records served by the remote product and stock endpoints.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Product master data as served by `GET /products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Create a product record.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}

/// Available quantity for a product, as served by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockRecord {
    /// Product the record describes.
    pub id: ProductId,
    /// Units available.
    pub amount: i64,
}

impl StockRecord {
    /// Check if a requested quantity can be satisfied.
    pub fn can_fulfill(&self, requested: i64) -> bool {
        requested <= self.amount
    }
}
