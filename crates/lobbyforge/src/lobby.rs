//! `Lobby` builder and request entry points.
//!
//! This is what a transport layer talks to. It ties the layers together:
//! raw request strings → typed ids → membership engine / trend aggregator
//! → repository and read-cache.

use std::sync::Arc;
use std::time::Duration;

use lobbyforge_cache::{ReadCache, TtlCache};
use lobbyforge_protocol::{Mode, ModeTrend, Player, PlayerId, Region, Room, RoomId};
use lobbyforge_room::{LeftRoom, LobbyConfig, LobbyError, MembershipEngine, TrendAggregator};
use lobbyforge_store::{InMemoryRepository, Repository};

/// Builder for configuring a [`Lobby`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use lobbyforge::Lobby;
///
/// let lobby = Lobby::builder()
///     .room_list_ttl(Duration::from_secs(30))
///     .trend_size(5)
///     .build_in_memory();
/// assert_eq!(lobby.config().trend_size, 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LobbyBuilder {
    config: LobbyConfig,
}

impl LobbyBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: LobbyConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets how long a per-mode room listing stays cached.
    pub fn room_list_ttl(mut self, ttl: Duration) -> Self {
        self.config.room_list_ttl = ttl;
        self
    }

    /// Sets how long a trend report stays cached.
    pub fn trend_ttl(mut self, ttl: Duration) -> Self {
        self.config.trend_ttl = ttl;
        self
    }

    /// Sets the upper bound on a leave-room operation.
    pub fn leave_deadline(mut self, deadline: Duration) -> Self {
        self.config.leave_deadline = deadline;
        self
    }

    /// Sets how many modes a trend report lists at most.
    pub fn trend_size(mut self, size: usize) -> Self {
        self.config.trend_size = size;
        self
    }

    /// Builds a lobby over the given repository and cache.
    ///
    /// Both are shared by the membership engine and the trend aggregator,
    /// so a mutation through one is seen (and invalidated) by the other.
    pub fn build<R: Repository, C: ReadCache>(self, repo: Arc<R>, cache: Arc<C>) -> Lobby<R, C> {
        tracing::debug!(config = ?self.config, "building lobby");
        Lobby {
            engine: MembershipEngine::new(Arc::clone(&repo), Arc::clone(&cache), self.config.clone()),
            trends: TrendAggregator::new(repo, cache, self.config),
        }
    }

    /// Builds a lobby backed by [`InMemoryRepository`] and [`TtlCache`].
    pub fn build_in_memory(self) -> Lobby {
        self.build(Arc::new(InMemoryRepository::new()), Arc::new(TtlCache::new()))
    }
}

/// The lobby service.
///
/// Every method takes raw request values, parses them into typed ids and
/// forwards to the engine or aggregator. Malformed input (an empty id, a
/// region that isn't three letters) is reported as
/// [`LobbyError::InvalidRequest`]. An unrecognised mode name is not
/// malformed; it reaches the engine and comes back as
/// [`LobbyError::InvalidMode`].
///
/// `Lobby` is `Send + Sync`; share it behind an `Arc`.
pub struct Lobby<R: Repository = InMemoryRepository, C: ReadCache = TtlCache> {
    engine: MembershipEngine<R, C>,
    trends: TrendAggregator<R, C>,
}

impl Lobby {
    /// Creates a new builder.
    pub fn builder() -> LobbyBuilder {
        LobbyBuilder::new()
    }
}

impl<R: Repository, C: ReadCache> Lobby<R, C> {
    pub fn config(&self) -> &LobbyConfig {
        self.engine.config()
    }

    /// The underlying membership engine, for callers that already hold
    /// typed ids.
    pub fn engine(&self) -> &MembershipEngine<R, C> {
        &self.engine
    }

    /// The underlying trend aggregator.
    pub fn trends(&self) -> &TrendAggregator<R, C> {
        &self.trends
    }

    pub async fn register_player(&self, id: &str, region: &str) -> Result<Player, LobbyError> {
        let id = PlayerId::parse(id)?;
        let region = Region::parse(region)?;
        self.engine.register_player(id, region).await
    }

    pub async fn create_room(&self, player_id: &str, mode: &str) -> Result<RoomId, LobbyError> {
        let player_id = PlayerId::parse(player_id)?;
        self.engine.create_room(&player_id, Mode::parse(mode)).await
    }

    pub async fn list_rooms(&self, mode: &str) -> Result<Vec<RoomId>, LobbyError> {
        self.engine.list_rooms_by_mode(Mode::parse(mode)).await
    }

    pub async fn join_room(&self, player_id: &str, room_id: &str) -> Result<(), LobbyError> {
        let player_id = PlayerId::parse(player_id)?;
        let room_id = RoomId::parse(room_id)?;
        self.engine.join_room(&player_id, &room_id).await
    }

    pub async fn leave_room(&self, player_id: &str) -> Result<LeftRoom, LobbyError> {
        let player_id = PlayerId::parse(player_id)?;
        self.engine.leave_room(&player_id).await
    }

    /// Top modes played in `region`.
    pub async fn region_trends(&self, region: &str) -> Result<Vec<ModeTrend>, LobbyError> {
        let region = Region::parse(region)?;
        self.trends.region_trends(&region).await
    }

    /// Top modes played in the player's region, cached per player.
    pub async fn player_region_trends(&self, player_id: &str) -> Result<Vec<ModeTrend>, LobbyError> {
        let player_id = PlayerId::parse(player_id)?;
        self.trends.player_region_trends(&player_id).await
    }

    pub async fn player(&self, id: &str) -> Result<Player, LobbyError> {
        let id = PlayerId::parse(id)?;
        self.engine.player(&id).await
    }

    pub async fn room(&self, id: &str) -> Result<Room, LobbyError> {
        let id = RoomId::parse(id)?;
        self.engine.room(&id).await
    }
}
