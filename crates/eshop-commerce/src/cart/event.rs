//! Cart change notifications.

use crate::cart::{Cart, CartSummary};
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartChange {
    Added { product_id: ProductId, quantity: i64 },
    Removed { product_id: ProductId },
    QuantitySet { product_id: ProductId, quantity: i64 },
    Cleared,
}

/// Published to subscribers after every committed mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEvent {
    pub change: CartChange,
    /// Cart as committed.
    pub cart: Cart,
    pub summary: CartSummary,
}
