//! Error types for the storefront.

use thiserror::Error;

use eshop_cache::CacheError;
use eshop_commerce::CommerceError;
use eshop_data::{CatalogError, FetchError};

/// Errors that can occur in the storefront.
#[derive(Error, Debug)]
pub enum ShopError {
    /// Configuration could not be read or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Cart operation failed.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Durable storage could not be opened.
    #[error(transparent)]
    Storage(#[from] CacheError),

    /// HTTP client could not be built.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Checkout was requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// No page has been visited yet, so there is nothing to retry.
    #[error("Nothing to retry")]
    NothingToRetry,
}
