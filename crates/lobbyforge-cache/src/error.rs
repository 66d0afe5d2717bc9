//! Error types for the cache layer.

use lobbyforge_protocol::ProtocolError;

/// Errors that can occur in cache operations.
///
/// A miss is *not* an error; [`ReadCache::get`](crate::ReadCache::get)
/// reports it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A cached payload could not be encoded or decoded.
    #[error("cache payload codec failure: {0}")]
    Codec(#[from] ProtocolError),

    /// The value stored under a key is not the shape that key's query
    /// produces (e.g. a trend report under a room-list key).
    #[error("cached value under {0} has the wrong shape")]
    ShapeMismatch(String),

    /// The cache backend failed.
    #[error("cache backend failure: {0}")]
    Backend(String),
}
