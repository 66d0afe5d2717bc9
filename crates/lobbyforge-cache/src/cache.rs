//! The `ReadCache` trait.

use std::future::Future;
use std::time::Duration;

use crate::{CacheError, CacheKey, CachedQuery};

/// A TTL key-value store for query results.
///
/// Only whole-cache invalidation is required of a backend. Membership
/// changes call [`invalidate_all`](ReadCache::invalidate_all), so a read
/// issued after a write has returned never sees a value computed before
/// it.
///
/// # Trait bounds
///
/// Same as the store crate's `Repository` on the storage
/// side: `Send + Sync + 'static` so one cache can be shared behind an
/// `Arc`, and every method returns an `impl Future + Send` so generic
/// callers can still be spawned onto the Tokio runtime.
///
/// # Misses are not errors
///
/// `get` distinguishes three outcomes:
/// - `Ok(Some(value))`: a live entry
/// - `Ok(None)`: nothing stored, or the entry expired
/// - `Err(_)`: the backend itself failed
///
/// Callers recompute on `Ok(None)` and give up on `Err`.
pub trait ReadCache: Send + Sync + 'static {
    /// Looks up a key.
    ///
    /// Returns `Ok(None)` on a miss, including when the entry has expired.
    fn get(
        &self,
        key: &CacheKey,
    ) -> impl Future<Output = Result<Option<CachedQuery>, CacheError>> + Send;

    /// Stores a value that expires after `ttl`.
    fn set(
        &self,
        key: &CacheKey,
        value: CachedQuery,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;

    /// Drops every entry.
    fn invalidate_all(&self) -> impl Future<Output = Result<(), CacheError>> + Send;
}
