//! Navigation routing for the eshop storefront.
//!
//! Navigation tokens (`#/category/shoes`, `/product/3`, ...) parse into a
//! [`Route`]. Each route names the catalog data it needs through
//! [`Route::requirement`]. A [`Navigator`] hands out [`Ticket`]s so that
//! only the most recent navigation may mount its page:
//!
//! ```rust
//! use eshop_router::{Navigator, Route};
//!
//! let nav = Navigator::new();
//! let bags = nav.begin(Route::parse("#/category/bags"));
//! let shoes = nav.begin(Route::parse("#/category/shoes"));
//!
//! assert!(!nav.is_current(&bags));
//! assert!(nav.is_current(&shoes));
//! ```

mod encoding;
mod navigation;
mod route;

pub use encoding::{percent_decode, percent_encode};
pub use navigation::{Navigator, PageState, Ticket};
pub use route::{DataRequirement, Route};
