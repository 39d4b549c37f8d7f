//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors raised by pure cart transformations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product is already a line item.
    #[error("Product already in cart: {0}")]
    DuplicateItem(ProductId),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}
