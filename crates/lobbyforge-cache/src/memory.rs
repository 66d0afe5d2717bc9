//! In-memory TTL cache.
//!
//! Entries are stored encoded, the way a networked key-value store would
//! hold them, so a payload that can't round-trip through the codec fails
//! here rather than only in production. Expiry is lazy: an expired entry
//! is dropped by the `get` that finds it, or in bulk by
//! [`TtlCache::purge_expired`].

use std::collections::HashMap;
use std::time::Duration;

use lobbyforge_protocol::{Codec, JsonCodec};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::{CacheError, CacheKey, CachedQuery, ReadCache};

#[derive(Debug)]
struct Entry {
    bytes: Vec<u8>,
    expires_at: Instant,
}

/// A [`ReadCache`] held in process memory.
///
/// Uses Tokio's clock, so tests can pause time and step past a TTL with
/// `tokio::time::advance`.
#[derive(Debug, Default)]
pub struct TtlCache<D: Codec = JsonCodec> {
    entries: RwLock<HashMap<String, Entry>>,
    codec: D,
}

impl TtlCache<JsonCodec> {
    /// Creates an empty cache using [`JsonCodec`].
    pub fn new() -> Self {
        Self::with_codec(JsonCodec)
    }
}

impl<D: Codec> TtlCache<D> {
    /// Creates an empty cache with a custom codec.
    pub fn with_codec(codec: D) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            codec,
        }
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!(purged, "expired cache entries purged");
        }
        purged
    }
}

impl<D: Codec> ReadCache for TtlCache<D> {
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedQuery>, CacheError> {
        let signature = key.to_string();
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(&signature) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => {
                    return Ok(Some(self.codec.decode(&entry.bytes)?));
                }
                Some(_) => {}
            }
        }

        // Expired. Re-check under the write lock: a `set` may have
        // replaced the entry in between.
        let mut entries = self.entries.write().await;
        if entries
            .get(&signature)
            .is_some_and(|entry| entry.expires_at <= now)
        {
            entries.remove(&signature);
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: CachedQuery,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let bytes = self.codec.encode(&value)?;
        let entry = Entry {
            bytes,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        tracing::debug!(dropped, "cache invalidated");
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
