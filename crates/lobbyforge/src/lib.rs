//! # Lobbyforge
//!
//! Matchmaking lobby for online games.
//!
//! Players register once, then create a room for a game mode, join an
//! existing room, or leave the room they are in. A room closes when its
//! last player leaves. Room listings and "most played modes in my region"
//! reports are served through a TTL read-cache that every mutation flushes.
//!
//! Storage and caching are traits ([`Repository`], [`ReadCache`]); in-memory
//! implementations ship for tests and single-process deployments.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lobbyforge::prelude::*;
//!
//! # async fn run() -> Result<(), LobbyError> {
//! lobbyforge::telemetry::init_tracing();
//!
//! let lobby = Lobby::builder().build_in_memory();
//! lobby.register_player("p1", "USA").await?;
//! let room_id = lobby.create_room("p1", "gunsmith").await?;
//! assert_eq!(lobby.list_rooms("gunsmith").await?, vec![room_id]);
//! # Ok(())
//! # }
//! ```

mod lobby;
pub mod telemetry;

pub use lobby::{Lobby, LobbyBuilder};
pub use lobbyforge_cache::{CacheError, CacheKey, CachedQuery, ReadCache, TtlCache};
pub use lobbyforge_protocol::{
    MembershipState, Mode, ModeTrend, Player, PlayerId, ProtocolError, Region, Room, RoomId,
};
pub use lobbyforge_room::{LeftRoom, LobbyConfig, LobbyError, MembershipEngine, TrendAggregator};
pub use lobbyforge_store::{InMemoryRepository, Repository, StoreError};

/// Everything needed to stand up and call a lobby.
pub mod prelude {
    pub use crate::{
        InMemoryRepository, LeftRoom, Lobby, LobbyBuilder, LobbyConfig, LobbyError, Mode,
        ModeTrend, Player, PlayerId, ReadCache, Region, Repository, Room, RoomId, TtlCache,
    };
}
