//! Catalog and cart domain types for eshop.
//!
//! This crate provides the storefront's domain model:
//!
//! - **Catalog**: normalized products, stock status, categories
//! - **Cart**: cart lines, pricing summary, shipping policy, and a
//!   persistent [`CartStore`](cart::CartStore) with change notification
//! - **Checkout**: the order snapshot exported when the customer buys
//!
//! # Example
//!
//! ```rust,ignore
//! use eshop_cache::{Cache, MemoryStore};
//! use eshop_commerce::prelude::*;
//!
//! let cache = Cache::new(MemoryStore::new());
//! let mut store = CartStore::open(cache, CART_KEY, ShippingPolicy::default())?;
//! let mut events = store.subscribe();
//!
//! store.add(&product, 1)?;
//!
//! let summary = store.summary()?;
//! println!("Total: {}", summary.total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product, StockStatus};

    // Cart
    pub use crate::cart::{
        Cart, CartChange, CartEvent, CartLine, CartStore, CartSummary, ShippingPolicy, CART_KEY,
        MAX_QUANTITY_PER_LINE,
    };

    // Checkout
    pub use crate::checkout::{CheckoutOrder, OrderItem};
}
