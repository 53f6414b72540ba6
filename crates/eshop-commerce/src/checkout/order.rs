//! Order types.

use crate::cart::{Cart, CartSummary, ShippingPolicy};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line of a checkout order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub title: String,
    /// Unit price.
    pub price: Money,
    pub quantity: i64,
}

/// The cart as exported at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutOrder {
    pub items: Vec<OrderItem>,
    pub summary: CartSummary,
    pub timestamp: DateTime<Utc>,
}

impl CheckoutOrder {
    /// Build an order from the current cart contents.
    pub fn from_cart(cart: &Cart, policy: &ShippingPolicy) -> Result<Self, CommerceError> {
        let items = cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id,
                title: line.title.clone(),
                price: line.price,
                quantity: line.quantity,
            })
            .collect();

        Ok(Self {
            items,
            summary: cart.summary(policy)?,
            timestamp: Utc::now(),
        })
    }

    /// Check if there is nothing to buy.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Currency;

    #[test]
    fn test_order_mirrors_cart() {
        let mut cart = Cart::new();
        let a = Product::new(ProductId::new(3), "Watch", Money::from_units(400, Currency::DKK)).with_stock(2);
        let b = Product::new(ProductId::new(8), "Strap", Money::from_units(60, Currency::DKK)).with_stock(9);
        cart.add(&a, 1).unwrap();
        cart.add(&b, 2).unwrap();

        let order = CheckoutOrder::from_cart(&cart, &ShippingPolicy::default()).unwrap();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[1].title, "Strap");
        assert_eq!(order.summary.subtotal, Money::from_units(520, Currency::DKK));
        assert!(order.summary.has_free_shipping());
    }

    #[test]
    fn test_order_json_shape() {
        let order = CheckoutOrder::from_cart(&Cart::new(), &ShippingPolicy::default()).unwrap();
        let json = serde_json::to_value(&order).unwrap();

        assert!(json["items"].as_array().unwrap().is_empty());
        assert!(json["summary"]["is_empty"].as_bool().unwrap());
        assert!(json["timestamp"].is_string());
        assert!(order.is_empty());
    }
}
