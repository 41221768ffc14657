//! Carts Data

use crate::domain::{carts::records::CartItemUuid, products::records::ProductUuid};

/// Product and quantity to add to a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    /// Used only when the product is not yet in the cart.
    pub uuid: CartItemUuid,
    pub product: ProductUuid,
    pub quantity: i32,
}

/// Outcome of applying a signed quantity delta to a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuantityChange {
    Updated,
    Removed,
    Missing,
}

impl QuantityChange {
    pub(crate) fn from_counts(updated: i64, removed: i64) -> Self {
        match (updated, removed) {
            (0, 0) => Self::Missing,
            (_, 0) => Self::Updated,
            _ => Self::Removed,
        }
    }
}
