//! Product catalog module.
//!
//! Contains the normalized product record and category labels.

mod category;
mod product;

pub use category::Category;
pub use product::{Product, StockStatus, MAX_RATING};
