//! Cart pricing calculations.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Derived cart aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost under the active policy.
    pub shipping: Money,
    /// subtotal + shipping.
    pub total: Money,
    /// Sum of quantities.
    pub item_count: i64,
    /// Whether the cart has no lines.
    pub is_empty: bool,
}

impl CartSummary {
    /// Check if the order ships for free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Flat-fee shipping with a free-shipping threshold.
///
/// Shipping is free only when the subtotal is strictly greater than the
/// threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShippingPolicy {
    /// Subtotal that must be exceeded for free shipping.
    pub free_shipping_threshold: Money,
    /// Fee charged otherwise.
    pub flat_fee: Money,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::from_units(500, Currency::DKK),
            flat_fee: Money::from_units(50, Currency::DKK),
        }
    }
}

impl ShippingPolicy {
    /// Create a policy. Threshold and fee must share a currency.
    pub fn new(free_shipping_threshold: Money, flat_fee: Money) -> Result<Self, CommerceError> {
        if free_shipping_threshold.currency != flat_fee.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: free_shipping_threshold.currency.code().to_string(),
                got: flat_fee.currency.code().to_string(),
            });
        }
        Ok(Self {
            free_shipping_threshold,
            flat_fee,
        })
    }

    /// Currency the policy prices in.
    pub fn currency(&self) -> Currency {
        self.free_shipping_threshold.currency
    }

    /// Shipping cost for a subtotal.
    pub fn shipping_for(&self, subtotal: &Money) -> Result<Money, CommerceError> {
        let ordering = subtotal
            .try_compare(&self.free_shipping_threshold)
            .ok_or_else(|| CommerceError::CurrencyMismatch {
                expected: self.currency().code().to_string(),
                got: subtotal.currency.code().to_string(),
            })?;
        match ordering {
            Ordering::Greater => Ok(Money::zero(self.currency())),
            _ => Ok(self.flat_fee),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::Product;
    use crate::ids::ProductId;

    fn dkk(units: i64) -> Money {
        Money::from_units(units, Currency::DKK)
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.shipping_for(&dkk(500)).unwrap(), dkk(50));
        assert_eq!(policy.shipping_for(&dkk(501)).unwrap(), dkk(0));
        assert_eq!(
            policy.shipping_for(&Money::new(50001, Currency::DKK)).unwrap(),
            dkk(0)
        );
    }

    #[test]
    fn test_single_line_summary() {
        let mut cart = Cart::new();
        let p = Product::new(ProductId::new(1), "Lamp", dkk(200)).with_stock(5);
        cart.add(&p, 1).unwrap();

        let summary = cart.summary(&ShippingPolicy::default()).unwrap();
        assert_eq!(
            summary,
            CartSummary {
                subtotal: dkk(200),
                shipping: dkk(50),
                total: dkk(250),
                item_count: 1,
                is_empty: false,
            }
        );
    }

    #[test]
    fn test_total_is_subtotal_plus_shipping() {
        let policy = ShippingPolicy::default();
        for units in [0, 120, 500, 501, 1999] {
            let mut cart = Cart::new();
            if units > 0 {
                let p = Product::new(ProductId::new(7), "x", dkk(units)).with_stock(1);
                cart.add(&p, 1).unwrap();
            }
            let s = cart.summary(&policy).unwrap();
            assert_eq!(s.total, s.subtotal.try_add(&s.shipping).unwrap());
        }
    }

    #[test]
    fn test_empty_cart_summary() {
        let summary = Cart::new().summary(&ShippingPolicy::default()).unwrap();
        assert!(summary.is_empty);
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.total, dkk(50));
    }

    #[test]
    fn test_policy_currency_mismatch() {
        let result = ShippingPolicy::new(dkk(500), Money::from_units(5, Currency::EUR));
        assert!(result.is_err());
    }
}
