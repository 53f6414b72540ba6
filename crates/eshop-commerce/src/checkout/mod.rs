//! Checkout module.
//!
//! Contains the order snapshot handed off when the customer checks out.

mod order;

pub use order::{CheckoutOrder, OrderItem};
