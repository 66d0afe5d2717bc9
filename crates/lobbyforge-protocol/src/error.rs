//! Error types for the protocol layer.
//!
//! Each crate in Lobbyforge defines its own error enum. A `ProtocolError`
//! always means a value could not be parsed, encoded or decoded; it never
//! says anything about storage or membership rules.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: truncated payloads, or bytes written by a different
    /// version of the payload type.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A value passed deserialization (or came in as a raw string) but
    /// violates a domain rule, e.g. an empty player id or a region that
    /// is not three letters.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
