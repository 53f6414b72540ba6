//! Category labels.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product category, identified by its slug (e.g. "smartphones").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category from its slug.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// The slug as used in URLs and routes.
    pub fn slug(&self) -> &str {
        &self.0
    }

    /// Display label with the first letter capitalized.
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Distinct categories of `products`, in first-seen order.
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<Category> {
        let mut seen: Vec<Category> = Vec::new();
        for product in products {
            if product.category.is_empty() || seen.iter().any(|c| c.0 == product.category) {
                continue;
            }
            seen.push(Category::new(product.category.clone()));
        }
        seen
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}
