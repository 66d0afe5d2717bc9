//! Error types for the store layer.

use lobbyforge_protocol::{PlayerId, RoomId};

/// Errors that can occur in repository operations.
///
/// Not-found is its own variant per document type so the room layer can
/// turn it into a user-facing condition; everything the store did not
/// expect ends up in [`StoreError::Backend`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No player document with this id.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// No room document with this id.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// Insert of a player whose id is already taken.
    #[error("player {0} already exists")]
    DuplicatePlayer(PlayerId),

    /// Insert of a room whose id is already taken.
    #[error("room {0} already exists")]
    DuplicateRoom(RoomId),

    /// The backing store failed (connection lost, write rejected, ...).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns `true` for the two not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlayerNotFound(_) | Self::RoomNotFound(_))
    }
}
