//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// Stock level as shown to customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    /// More than ten units available.
    InStock,
    /// Between one and ten units available.
    LowStock,
    /// Nothing left; the product cannot be bought.
    OutOfStock,
}

impl StockStatus {
    /// Classify a stock count.
    pub fn from_stock(stock: u32) -> Self {
        match stock {
            0 => StockStatus::OutOfStock,
            1..=10 => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }

    /// CSS class used by the views.
    pub fn css_class(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }

    /// Human-readable label.
    pub fn label(&self, stock: u32) -> String {
        match self {
            StockStatus::InStock => format!("In stock ({} available)", stock),
            StockStatus::LowStock => format!("Only {} left", stock),
            StockStatus::OutOfStock => "Out of stock".to_string(),
        }
    }
}

/// A product in the catalog.
///
/// Records are produced by the catalog client after normalization and are
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Identifier assigned by the remote catalog.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Unit price (never negative).
    pub price: Money,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Gallery image URLs.
    pub images: Vec<String>,
    /// Category slug.
    pub category: String,
    /// Brand, when the catalog provides one.
    pub brand: Option<String>,
    /// Average rating between 0 and 5.
    pub rating: f64,
    /// Units in stock.
    pub stock: u32,
}

impl Product {
    /// Create a product with the required fields; everything else defaults.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            price,
            thumbnail: String::new(),
            images: Vec::new(),
            category: String::new(),
            brand: None,
            rating: 0.0,
            stock: 0,
        }
    }

    /// Builder: set the stock count.
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Builder: set the category slug.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder: set the rating, clamped to `0..=5`.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = clamp_rating(rating);
        self
    }

    /// Derived stock status.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }

    /// Check if the product can be added to a cart.
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Number of filled and empty stars for the rating display.
    pub fn rating_stars(&self) -> (u8, u8) {
        let full = clamp_rating(self.rating).floor() as u8;
        (full, MAX_RATING as u8 - full)
    }

    /// Image to use on cards: the thumbnail, else the first gallery image.
    pub fn primary_image(&self) -> Option<&str> {
        if !self.thumbnail.is_empty() {
            return Some(&self.thumbnail);
        }
        self.images.first().map(String::as_str)
    }
}

/// Clamp a rating into the displayable range. NaN becomes 0.
pub(crate) fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, MAX_RATING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn product() -> Product {
        Product::new(ProductId::new(1), "Lipstick", Money::from_units(200, Currency::DKK))
    }

    #[test]
    fn test_stock_status_thresholds() {
        assert_eq!(StockStatus::from_stock(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_stock(1), StockStatus::LowStock);
        assert_eq!(StockStatus::from_stock(10), StockStatus::LowStock);
        assert_eq!(StockStatus::from_stock(11), StockStatus::InStock);
    }

    #[test]
    fn test_availability() {
        assert!(!product().is_available());
        assert!(product().with_stock(3).is_available());
        assert_eq!(product().stock_status().css_class(), "out-of-stock");
    }

    #[test]
    fn test_rating_is_clamped() {
        assert_eq!(product().with_rating(7.5).rating, 5.0);
        assert_eq!(product().with_rating(-1.0).rating, 0.0);
        assert_eq!(product().with_rating(f64::NAN).rating, 0.0);
    }

    #[test]
    fn test_rating_stars_floor() {
        assert_eq!(product().with_rating(4.94).rating_stars(), (4, 1));
        assert_eq!(product().with_rating(5.0).rating_stars(), (5, 0));
        assert_eq!(product().rating_stars(), (0, 5));
    }

    #[test]
    fn test_primary_image_falls_back_to_gallery() {
        let mut p = product();
        assert_eq!(p.primary_image(), None);
        p.images = vec!["a.png".into(), "b.png".into()];
        assert_eq!(p.primary_image(), Some("a.png"));
        p.thumbnail = "t.png".into();
        assert_eq!(p.primary_image(), Some("t.png"));
    }
}
