//! Cart and line item types.
//!
//! A `Cart` is a value: every transformation returns a new cart and leaves
//! the original untouched, so a failed operation can never leave a half
//! applied change behind.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::product::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A product in the cart together with its quantity.
///
/// Serializes flat, as the product fields plus `amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product ID, unique within a cart.
    pub id: ProductId,
    /// Product title (copied at add time).
    pub title: String,
    /// Unit price (copied at add time).
    pub price: f64,
    /// Image URL (copied at add time).
    pub image: String,
    /// Quantity, always at least 1.
    pub amount: i64,
}

impl LineItem {
    /// Create a line item holding a single unit of `product`.
    pub fn new(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }

    /// Price times amount.
    pub fn total(&self) -> f64 {
        self.price * self.amount as f64
    }
}

/// Ordered sequence of line items, in the order products were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from line items, keeping the first entry per product.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if !cart.contains(item.id) && item.amount > 0 {
                cart.items.push(item);
            }
        }
        cart
    }

    /// Return a cart with `product` appended as a new line item of amount 1.
    pub fn with_appended(&self, product: Product) -> Result<Self, CommerceError> {
        if self.contains(product.id) {
            return Err(CommerceError::DuplicateItem(product.id));
        }

        let mut items = self.items.clone();
        items.push(LineItem::new(product));
        Ok(Self { items })
    }

    /// Return a cart without the line item for `product_id`.
    pub fn without(&self, product_id: ProductId) -> Result<Self, CommerceError> {
        if !self.contains(product_id) {
            return Err(CommerceError::ItemNotInCart(product_id));
        }

        let items = self
            .items
            .iter()
            .filter(|i| i.id != product_id)
            .cloned()
            .collect();
        Ok(Self { items })
    }

    /// Return a cart with the amount of `product_id` replaced.
    ///
    /// The flag is `false` when no line item matched; the returned cart is
    /// then identical to `self`.
    pub fn with_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(Self, bool), CommerceError> {
        if amount <= 0 {
            return Err(CommerceError::InvalidQuantity(amount));
        }

        let mut matched = false;
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == product_id {
                    matched = true;
                    LineItem {
                        amount,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Ok((Self { items }, matched))
    }

    /// Get the line item for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Line items in add order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over line items in add order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of amounts).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Amount per product, for badges next to catalog entries.
    pub fn amounts(&self) -> BTreeMap<ProductId, i64> {
        self.items.iter().map(|i| (i.id, i.amount)).collect()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::total).sum()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
