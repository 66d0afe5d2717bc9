//! Error types for the room layer.

use lobbyforge_cache::CacheError;
use lobbyforge_protocol::{PlayerId, ProtocolError, RoomId};
use lobbyforge_store::StoreError;

/// Errors that can occur during lobby operations.
///
/// The domain variants are expected outcomes of validation and map to
/// client errors. `Storage` and `Cache` wrap failures nobody asked for and
/// map to server errors.
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// Registration with an id that is already taken.
    #[error("player id {0} is already taken")]
    DuplicatePlayer(PlayerId),

    #[error("player {0} does not exist")]
    PlayerNotFound(PlayerId),

    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// The room's roster has reached its mode's capacity.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// Create or join while the player already belongs to a room.
    #[error("player {0} is already in room {1}")]
    PlayerAlreadyInRoom(PlayerId, RoomId),

    /// Leave while the player belongs to no room.
    #[error("player {0} is not in any room")]
    PlayerNotInRoom(PlayerId),

    #[error("game mode does not exist")]
    InvalidMode,

    /// A raw request value could not be parsed (empty id, bad region).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The operation did not finish within its deadline.
    #[error("operation exceeded its deadline")]
    DeadlineExceeded,

    #[error(transparent)]
    Storage(StoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl LobbyError {
    /// Returns `true` for conditions caused by the request rather than
    /// the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::Storage(_) | Self::Cache(_) | Self::DeadlineExceeded
        )
    }

    /// HTTP-style status code for the transport layer.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidMode | Self::InvalidRequest(_) | Self::RoomFull(_) => 400,
            Self::PlayerNotFound(_) | Self::RoomNotFound(_) => 404,
            Self::DuplicatePlayer(_)
            | Self::PlayerAlreadyInRoom(..)
            | Self::PlayerNotInRoom(_) => 409,
            Self::DeadlineExceeded => 504,
            Self::Storage(_) | Self::Cache(_) => 500,
        }
    }
}

/// Lifts the store's not-found and duplicate conditions into their domain
/// variants; everything else passes through as `Storage`.
impl From<StoreError> for LobbyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PlayerNotFound(id) => Self::PlayerNotFound(id),
            StoreError::RoomNotFound(id) => Self::RoomNotFound(id),
            StoreError::DuplicatePlayer(id) => Self::DuplicatePlayer(id),
            other => Self::Storage(other),
        }
    }
}

/// A request value that failed to parse is the caller's fault.
impl From<ProtocolError> for LobbyError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::InvalidMessage(msg) => Self::InvalidRequest(msg),
            other => Self::InvalidRequest(other.to_string()),
        }
    }
}
