//! Read-cache for Lobbyforge query results.
//!
//! Room listings and trend reports are expensive scans. Their results are
//! cached under a typed [`CacheKey`] for a fixed TTL and wiped wholesale
//! whenever membership changes.
//!
//! # Key types
//!
//! - [`ReadCache`]: the trait a cache backend implements
//! - [`CacheKey`]: which query a cached value answers
//! - [`CachedQuery`]: the cached payload, one variant per query shape
//! - [`TtlCache`]: in-memory backend storing codec-encoded entries

mod cache;
mod error;
mod key;
mod memory;

pub use cache::ReadCache;
pub use error::CacheError;
pub use key::{CacheKey, CachedQuery};
pub use memory::TtlCache;
