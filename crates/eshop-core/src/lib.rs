//! Storefront wiring for eshop.
//!
//! A [`Storefront`] ties the catalog client, the persistent cart, the
//! router and the view builders together and mounts finished pages on a
//! [`Surface`]. The host (a terminal, a test) only supplies the surface and
//! feeds navigation tokens and [`UiAction`]s in.
//!
//! # Page lifecycle
//!
//! ```text
//! token ──parse──▶ Route ──begin──▶ Ticket ──mount──▶ Loading
//!                                      │
//!                         catalog fetch (async)
//!                                      │
//!                   ticket still current? ──no──▶ discarded
//!                                      │yes
//!                            Ready  or  Failed (retry link)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use eshop_core::prelude::*;
//!
//! let config = ShopConfig::load(Path::new("eshop.toml"))?;
//! let surface = Arc::new(MemorySurface::new());
//! let shop = Storefront::from_config(&config, surface.clone())?;
//!
//! shop.navigate("#/category/smartphones").await;
//! shop.dispatch(UiAction::BuyNow(ProductId::new(1))).await?;
//! ```

mod app;
mod config;
mod error;
mod surface;

pub use app::*;
pub use config::*;
pub use error::*;
pub use surface::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        MemorySurface, Outcome, Screen, ShopConfig, ShopError, Storefront, Surface, UiAction,
    };
    pub use eshop_commerce::prelude::*;
    pub use eshop_router::{PageState, Route};
}
