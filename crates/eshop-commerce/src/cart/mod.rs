//! Shopping cart module.
//!
//! Contains the cart model, pricing, and the persistent store.

mod cart;
mod event;
mod pricing;
mod store;

pub use cart::{Cart, CartLine, MAX_QUANTITY_PER_LINE};
pub use event::{CartChange, CartEvent};
pub use pricing::{CartSummary, ShippingPolicy};
pub use store::{CartStore, CART_KEY};
