//! Catalog HTTP client for eshop.
//!
//! Wraps the remote product API behind a [`CatalogClient`] that returns
//! normalized [`Product`](eshop_commerce::catalog::Product) records. The
//! network sits behind the [`Transport`] trait: [`ReqwestTransport`] talks
//! HTTP, [`MockTransport`] answers from memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use eshop_data::prelude::*;
//!
//! let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(10))?);
//! let fetch = FetchClient::new("https://dummyjson.com", transport)?;
//! let catalog = CatalogClient::new(fetch);
//!
//! let phones = catalog.list_by_category("smartphones").await?;
//! let product = catalog.get_product(ProductId::new(1)).await?;
//! ```

mod catalog;
mod client;
mod error;
mod mock;
mod request;
mod response;
mod transport;

pub use catalog::CatalogClient;
pub use client::FetchClient;
pub use error::{CatalogError, FetchError};
pub use mock::MockTransport;
pub use request::Request;
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogClient, CatalogError, FetchClient, FetchError, MockTransport, ReqwestTransport,
        Transport,
    };
    pub use eshop_commerce::ProductId;
}
