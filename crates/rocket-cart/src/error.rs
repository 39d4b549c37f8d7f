//! Cart operation failures.
//!
//! `Display` yields the fixed user-facing message for each category; the
//! fields carry detail for logs.

use rocket_commerce::ProductId;
use thiserror::Error;

/// A failed cart operation, as reported through the notifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Product lookup failed or the cart could not be saved.
    #[error("Failed to add product")]
    AddFailed { product_id: ProductId, reason: String },

    /// Product is not in the cart, or the cart could not be saved.
    #[error("Failed to remove product")]
    RemoveFailed { product_id: ProductId, reason: String },

    /// Requested amount exceeds available stock.
    #[error("Requested quantity is out of stock")]
    StockInsufficient {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Stock lookup failed or the cart could not be saved.
    #[error("Failed to change product quantity")]
    UpdateFailed { product_id: ProductId, reason: String },
}

impl CartError {
    /// Product the failed operation targeted.
    pub fn product_id(&self) -> ProductId {
        match self {
            Self::AddFailed { product_id, .. }
            | Self::RemoveFailed { product_id, .. }
            | Self::StockInsufficient { product_id, .. }
            | Self::UpdateFailed { product_id, .. } => *product_id,
        }
    }

    /// Diagnostic detail, not meant for end users.
    pub fn detail(&self) -> String {
        match self {
            Self::AddFailed { reason, .. }
            | Self::RemoveFailed { reason, .. }
            | Self::UpdateFailed { reason, .. } => reason.clone(),
            Self::StockInsufficient {
                requested,
                available,
                ..
            } => format!("requested {}, available {}", requested, available),
        }
    }
}
