//! Core domain entities representing the business data model.
//!
//! - [`ShortUrl`] - A shortened URL record with lifecycle flags
//! - [`NewShortUrl`] - Input data for creating a record
//! - [`CacheEntry`] - A cached record or a negative-cache tombstone

pub mod cache_entry;
pub mod short_url;

pub use cache_entry::CacheEntry;
pub use short_url::{NewShortUrl, ShortUrl};
