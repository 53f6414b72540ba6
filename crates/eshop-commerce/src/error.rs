//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in cart and catalog operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity passed to an add operation was not positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Product cannot be bought because it has no stock.
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// A product identifier could not be parsed.
    #[error("Invalid product id: {0:?}")]
    InvalidProductId(String),

    /// Durable storage failed; the in-memory cart was left unchanged.
    #[error("Cart storage error: {0}")]
    Storage(#[from] eshop_cache::CacheError),
}
