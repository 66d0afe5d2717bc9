//! Codec trait and implementations for serializing payloads.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! External key-value stores (the read-cache in particular) only hold
//! bytes, so something has to sit between `CachedQuery` and the store.
//! The cache doesn't care HOW payloads are serialized; it only needs
//! something that implements [`Codec`]. Swapping the format means writing
//! a new codec, not touching the cache.
//!
//! [`JsonCodec`] is the default. JSON entries can be read by hand when
//! inspecting the store, which matters more here than payload size.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync`: the codec is stored inside the cache, which is shared
///   behind an `Arc` and called from whichever Tokio worker thread runs
///   the request.
/// - `'static`: the codec owns everything it needs and borrows nothing,
///   so the cache holding it can live as long as the process.
///
/// ## Generic methods
///
/// `encode` and `decode` are generic over the payload type `T`:
/// - `encode<T: Serialize>`: anything serde can write out
/// - `decode<T: DeserializeOwned>`: anything serde can rebuild
///
/// `DeserializeOwned` (rather than `Deserialize<'de>`) means the decoded
/// value owns its data and doesn't borrow from `data`. The cache decodes
/// under a read lock and drops the lock right after, so a borrowed result
/// would not outlive it.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use lobbyforge_protocol::{Codec, JsonCodec, Mode, ModeTrend};
///
/// let codec = JsonCodec;
/// let trend = ModeTrend { mode: Mode::GunSmith, count: 4 };
///
/// let bytes = codec.encode(&trend).unwrap();
/// let decoded: ModeTrend = codec.decode(&bytes).unwrap();
/// assert_eq!(trend, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
