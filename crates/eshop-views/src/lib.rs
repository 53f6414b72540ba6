//! HTML view builders for the eshop storefront.
//!
//! Every function here is pure: same input, same [`Fragment`]. All text
//! taken from the catalog or the cart is HTML-escaped before it is
//! interpolated. Interactive elements carry `data-action` and
//! `data-product-id` attributes that the host maps back to storefront
//! actions.

mod fragment;
mod sections;

pub use fragment::{html_escape, Fragment};
pub use sections::*;
