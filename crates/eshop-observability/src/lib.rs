//! Logging setup for eshop.
//!
//! This crate provides:
//! - `LogLevel` / `LogFormat` - the configurable logging vocabulary
//! - `init_logging` - installs a `tracing-subscriber` fmt subscriber
//! - `page_span` / `action_span` - spans shared by the storefront and CLI

mod logging;
mod span;

pub use logging::*;
pub use span::*;
