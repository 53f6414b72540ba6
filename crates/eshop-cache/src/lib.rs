//! Durable key-value storage for the eshop cart.
//!
//! Provides a small, typed API over a pluggable key-value backend with
//! automatic JSON serialization. Two backends ship with the crate:
//!
//! - [`FileStore`] keeps one file per key and replaces it atomically, so a
//!   reader never observes a half-written value.
//! - [`MemoryStore`] keeps everything in process memory (tests, demos).
//!
//! # Example
//!
//! ```rust,ignore
//! use eshop_cache::{Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::open(".eshop")?);
//!
//! // Store a value
//! cache.set("eshop_cart_v2", &cart)?;
//!
//! // Retrieve a value (a missing key is `None`, never an error)
//! let cart: Option<Cart> = cache.get("eshop_cart_v2")?;
//!
//! // Delete a value
//! cache.delete("eshop_cart_v2")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::{is_valid_key, FileStore};
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
