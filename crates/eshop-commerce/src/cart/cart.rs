//! Cart and line types.

use crate::cart::{CartSummary, ShippingPolicy};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// A shopping cart: lines in insertion order, at most one per product.
///
/// Serializes as a bare JSON array of lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find the line for a product.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Add `quantity` units of `product`.
    ///
    /// Merges into the existing line for the same product, otherwise
    /// appends a new line. Returns an error if:
    /// - Quantity is not positive
    /// - The product is out of stock
    /// - The line would exceed MAX_QUANTITY_PER_LINE
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if !product.is_available() {
            return Err(CommerceError::OutOfStock(product.id));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            check_limit(new_quantity)?;
            existing.quantity = new_quantity;
            return Ok(());
        }

        check_limit(quantity)?;
        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() < len_before
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Returns whether the
    /// cart changed.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove(product_id));
        }
        check_limit(quantity)?;

        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Raise the quantity of an existing line by one.
    pub fn increment(&mut self, product_id: ProductId) -> Result<bool, CommerceError> {
        match self.line(product_id) {
            Some(line) => {
                let quantity = line.quantity.checked_add(1).ok_or(CommerceError::Overflow)?;
                self.set_quantity(product_id, quantity)
            }
            None => Ok(false),
        }
    }

    /// Lower the quantity of an existing line by one, removing it at zero.
    pub fn decrement(&mut self, product_id: ProductId) -> Result<bool, CommerceError> {
        match self.line(product_id) {
            Some(line) => self.set_quantity(product_id, line.quantity.saturating_sub(1)),
            None => Ok(false),
        }
    }

    /// Restore the line invariants on a cart read from storage.
    ///
    /// Lines for the same product merge into the first one, quantities are
    /// capped at [`MAX_QUANTITY_PER_LINE`] and lines with a quantity of zero
    /// or less are dropped. Returns whether anything changed.
    pub fn normalize(&mut self) -> bool {
        let before = self.lines.clone();
        let mut merged: Vec<CartLine> = Vec::with_capacity(self.lines.len());
        for line in self.lines.drain(..) {
            match merged.iter_mut().find(|l| l.product_id == line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => merged.push(line),
            }
        }
        merged.retain(|l| l.quantity > 0);
        for line in &mut merged {
            line.quantity = line.quantity.min(MAX_QUANTITY_PER_LINE);
        }
        self.lines = merged;
        self.lines != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of units (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals in `currency`.
    pub fn subtotal(&self, currency: Currency) -> Result<Money, CommerceError> {
        let mut subtotal = Money::zero(currency);
        for line in &self.lines {
            let total = line.line_total()?;
            if total.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: total.currency.code().to_string(),
                });
            }
            subtotal = subtotal.try_add(&total).ok_or(CommerceError::Overflow)?;
        }
        Ok(subtotal)
    }

    /// Derived aggregates under a shipping policy.
    pub fn summary(&self, policy: &ShippingPolicy) -> Result<CartSummary, CommerceError> {
        let subtotal = self.subtotal(policy.currency())?;
        let shipping = policy.shipping_for(&subtotal)?;
        let total = subtotal.try_add(&shipping).ok_or(CommerceError::Overflow)?;
        Ok(CartSummary {
            subtotal,
            shipping,
            total,
            item_count: self.item_count(),
            is_empty: self.is_empty(),
        })
    }
}

fn check_limit(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_LINE {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_LINE,
        ));
    }
    Ok(())
}

/// One product in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product in this line.
    pub product_id: ProductId,
    /// Product title at the time it was added.
    pub title: String,
    /// Unit price at the time it was added.
    pub price: Money,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Category slug.
    #[serde(default)]
    pub category: String,
    /// Units of the product, at least 1.
    pub quantity: i64,
    /// When the line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            price: product.price,
            thumbnail: product.primary_image().unwrap_or_default().to_string(),
            category: product.category.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, units: i64) -> Product {
        Product::new(ProductId::new(id), format!("Product {}", id), Money::from_units(units, Currency::DKK))
            .with_stock(20)
    }

    #[test]
    fn test_add_same_product_twice_merges() {
        let mut cart = Cart::new();
        let p = product(1, 100);

        cart.add(&p, 1).unwrap();
        cart.add(&p, 1).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product(3, 10), 1).unwrap();
        cart.add(&product(1, 10), 1).unwrap();
        cart.add(&product(3, 10), 2).unwrap();

        let ids: Vec<u64> = cart.lines().iter().map(|l| l.product_id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add(&product(1, 10), 0),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_out_of_stock() {
        let mut cart = Cart::new();
        let p = product(1, 10).with_stock(0);
        assert!(matches!(cart.add(&p, 1), Err(CommerceError::OutOfStock(_))));
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        let p = product(1, 1);
        cart.add(&p, MAX_QUANTITY_PER_LINE).unwrap();

        let result = cart.add(&p, 1);
        assert!(matches!(result, Err(CommerceError::QuantityExceedsLimit(_, _))));
        assert_eq!(cart.lines()[0].quantity, MAX_QUANTITY_PER_LINE);
    }

    #[test]
    fn test_set_quantity_zero_is_remove() {
        let p = product(1, 10);
        let mut a = Cart::new();
        a.add(&p, 3).unwrap();
        a.add(&product(2, 10), 1).unwrap();
        let mut b = a.clone();

        assert!(a.set_quantity(p.id, 0).unwrap());
        assert!(b.remove(p.id));
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_quantity_missing_line_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.set_quantity(ProductId::new(9), 4).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = Cart::new();
        let p = product(1, 10);
        cart.add(&p, 1).unwrap();

        assert!(cart.increment(p.id).unwrap());
        assert_eq!(cart.item_count(), 2);
        assert!(cart.decrement(p.id).unwrap());
        assert!(cart.decrement(p.id).unwrap());
        assert!(cart.is_empty());
        assert!(!cart.decrement(p.id).unwrap());
    }

    #[test]
    fn test_decrement_saturates() {
        let mut cart = Cart::new();
        let p = product(1, 10);
        cart.add(&p, 1).unwrap();
        cart.lines[0].quantity = i64::MIN;

        assert!(cart.decrement(p.id).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_normalize_merges_caps_and_drops() {
        let mut cart = Cart::new();
        cart.add(&product(1, 10), 2).unwrap();
        cart.add(&product(2, 10), 1).unwrap();
        cart.add(&product(3, 10), 1).unwrap();
        let mut dup = cart.lines[0].clone();
        dup.quantity = 3;
        cart.lines.push(dup);
        cart.lines[1].quantity = 0;
        cart.lines[2].quantity = MAX_QUANTITY_PER_LINE + 5;

        assert!(cart.normalize());
        let lines: Vec<(u64, i64)> = cart.lines().iter().map(|l| (l.product_id.get(), l.quantity)).collect();
        assert_eq!(lines, vec![(1, 5), (3, MAX_QUANTITY_PER_LINE)]);
        assert!(!cart.normalize());
    }

    #[test]
    fn test_subtotal_and_item_count() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 2).unwrap();
        cart.add(&product(2, 50), 1).unwrap();

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(Currency::DKK).unwrap(), Money::from_units(250, Currency::DKK));
    }

    #[test]
    fn test_subtotal_currency_mismatch() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 1).unwrap();
        assert!(matches!(
            cart.subtotal(Currency::EUR),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_serializes_as_array() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 1).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["product_id"], 1);

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
