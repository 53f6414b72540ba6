//! Persistent cart store with change notification.

use eshop_cache::{Cache, CacheError};
use tokio::sync::broadcast;

use crate::cart::{Cart, CartChange, CartEvent, CartSummary, ShippingPolicy};
use crate::catalog::Product;
use crate::checkout::CheckoutOrder;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Default key under which the cart snapshot is stored.
pub const CART_KEY: &str = "eshop_cart_v2";

const EVENT_CAPACITY: usize = 64;

/// Owns the cart and keeps it in sync with durable storage.
///
/// Every mutation is applied to a copy of the cart, the copy is persisted,
/// and only then does it replace the in-memory cart. A storage failure
/// therefore leaves the store exactly as it was. Successful mutations are
/// published to [`subscribe`](Self::subscribe) receivers; mutations that
/// change nothing are neither persisted nor published.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    cache: Cache,
    key: String,
    policy: ShippingPolicy,
    events: broadcast::Sender<CartEvent>,
}

impl CartStore {
    /// Load the cart stored under `key`.
    ///
    /// A missing key yields an empty cart. A snapshot that no longer
    /// deserializes is logged and replaced by an empty cart. Duplicate
    /// lines and out-of-range quantities are repaired with
    /// [`Cart::normalize`].
    pub fn open(cache: Cache, key: impl Into<String>, policy: ShippingPolicy) -> Result<Self, CommerceError> {
        let key = key.into();
        let mut cart = match cache.get::<Cart>(&key) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(key = %key, error = %e, "discarding unreadable cart snapshot");
                Cart::new()
            }
            Err(e) => return Err(e.into()),
        };
        if cart.normalize() {
            tracing::warn!(key = %key, "repaired invalid lines in cart snapshot");
        }
        tracing::debug!(key = %key, lines = cart.unique_item_count(), "cart loaded");

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            cart,
            cache,
            key,
            policy,
            events,
        })
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        let mut next = self.cart.clone();
        next.add(product, quantity)?;
        self.commit(
            next,
            CartChange::Added {
                product_id: product.id,
                quantity,
            },
        )
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> Result<bool, CommerceError> {
        let mut next = self.cart.clone();
        if !next.remove(product_id) {
            return Ok(false);
        }
        self.commit(next, CartChange::Removed { product_id })?;
        Ok(true)
    }

    /// Set the quantity of a line; zero or less removes it.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        let mut next = self.cart.clone();
        if !next.set_quantity(product_id, quantity)? {
            return Ok(false);
        }
        self.commit(next, CartChange::QuantitySet { product_id, quantity })?;
        Ok(true)
    }

    /// Raise a line's quantity by one.
    pub fn increment(&mut self, product_id: ProductId) -> Result<bool, CommerceError> {
        match self.cart.line(product_id) {
            Some(line) => {
                let quantity = line.quantity.checked_add(1).ok_or(CommerceError::Overflow)?;
                self.set_quantity(product_id, quantity)
            }
            None => Ok(false),
        }
    }

    /// Lower a line's quantity by one, removing it at zero.
    pub fn decrement(&mut self, product_id: ProductId) -> Result<bool, CommerceError> {
        match self.cart.line(product_id) {
            Some(line) => self.set_quantity(product_id, line.quantity.saturating_sub(1)),
            None => Ok(false),
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.commit(Cart::new(), CartChange::Cleared)
    }

    /// Owned copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.cart.clone()
    }

    /// Current aggregates.
    pub fn summary(&self) -> Result<CartSummary, CommerceError> {
        self.cart.summary(&self.policy)
    }

    /// Sum of quantities, for the header badge.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Shipping policy in effect.
    pub fn policy(&self) -> &ShippingPolicy {
        &self.policy
    }

    /// Receive an event for every committed mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Snapshot the cart as an order for checkout.
    pub fn export_for_checkout(&self) -> Result<CheckoutOrder, CommerceError> {
        CheckoutOrder::from_cart(&self.cart, &self.policy)
    }

    fn commit(&mut self, next: Cart, change: CartChange) -> Result<(), CommerceError> {
        let summary = next.summary(&self.policy)?;
        if let Err(e) = self.cache.set(&self.key, &next) {
            tracing::error!(key = %self.key, error = %e, "failed to persist cart");
            return Err(e.into());
        }
        self.cart = next;
        tracing::debug!(?change, items = summary.item_count, "cart updated");

        // No subscribers is fine.
        let _ = self.events.send(CartEvent {
            change,
            cart: self.cart.clone(),
            summary,
        });
        Ok(())
    }
}
