//! Shared test doubles for the room layer.
//!
//! - [`ProbeRepository`] wraps an `InMemoryRepository`, counts scans and
//!   can be told to fail specific writes.
//! - [`DownCache`] is a cache whose every call fails.
//! - [`assert_consistent`] checks the membership invariants over a
//!   repository snapshot.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use lobbyforge_cache::{CacheError, CacheKey, CachedQuery, ReadCache, TtlCache};
use lobbyforge_protocol::{Mode, Player, PlayerId, Region, Room, RoomId};
use lobbyforge_room::{LobbyConfig, MembershipEngine, TrendAggregator};
use lobbyforge_store::{InMemoryRepository, Repository, StoreError};

// =========================================================================
// ProbeRepository
// =========================================================================

/// Which write a [`ProbeRepository`] should refuse.
#[derive(Debug, Default)]
pub struct Faults {
    pub insert_room: AtomicBool,
    pub add_player_to_room: AtomicBool,
    pub remove_player_from_room: AtomicBool,
    pub delete_room: AtomicBool,
    /// Fails `update_player_room(_, None)`, i.e. rollbacks and the final
    /// step of a leave.
    pub clear_player_room: AtomicBool,
    /// Delays `remove_player_from_room` by this many milliseconds.
    pub remove_delay_ms: AtomicUsize,
}

#[derive(Debug, Default)]
pub struct ProbeRepository {
    pub inner: InMemoryRepository,
    pub faults: Faults,
    pub room_scans: AtomicUsize,
    pub player_scans: AtomicUsize,
    pub room_lookups: AtomicUsize,
}

impl ProbeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(flag: &AtomicBool) {
        flag.store(true, Ordering::SeqCst);
    }

    pub fn room_scans(&self) -> usize {
        self.room_scans.load(Ordering::SeqCst)
    }

    pub fn player_scans(&self) -> usize {
        self.player_scans.load(Ordering::SeqCst)
    }

    pub fn room_lookups(&self) -> usize {
        self.room_lookups.load(Ordering::SeqCst)
    }
}

fn injected(op: &str) -> StoreError {
    StoreError::Backend(format!("injected {op} failure"))
}

impl Repository for ProbeRepository {
    async fn get_player(&self, id: &PlayerId) -> Result<Player, StoreError> {
        self.inner.get_player(id).await
    }

    async fn player_exists(&self, id: &PlayerId) -> Result<bool, StoreError> {
        self.inner.player_exists(id).await
    }

    async fn insert_player(&self, id: &PlayerId, region: &Region) -> Result<(), StoreError> {
        self.inner.insert_player(id, region).await
    }

    async fn get_room(&self, id: &RoomId) -> Result<Room, StoreError> {
        self.room_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_room(id).await
    }

    async fn insert_room(&self, room: Room) -> Result<(), StoreError> {
        if self.faults.insert_room.load(Ordering::SeqCst) {
            return Err(injected("insert_room"));
        }
        self.inner.insert_room(room).await
    }

    async fn update_player_room(
        &self,
        id: &PlayerId,
        room: Option<&RoomId>,
    ) -> Result<(), StoreError> {
        if room.is_none() && self.faults.clear_player_room.load(Ordering::SeqCst) {
            return Err(injected("clear_player_room"));
        }
        self.inner.update_player_room(id, room).await
    }

    async fn add_player_to_room(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<Room, StoreError> {
        if self.faults.add_player_to_room.load(Ordering::SeqCst) {
            return Err(injected("add_player_to_room"));
        }
        self.inner.add_player_to_room(room_id, player_id).await
    }

    async fn remove_player_from_room(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<Room, StoreError> {
        let delay = self.faults.remove_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
        }
        if self.faults.remove_player_from_room.load(Ordering::SeqCst) {
            return Err(injected("remove_player_from_room"));
        }
        self.inner.remove_player_from_room(room_id, player_id).await
    }

    async fn delete_room(&self, id: &RoomId) -> Result<(), StoreError> {
        if self.faults.delete_room.load(Ordering::SeqCst) {
            return Err(injected("delete_room"));
        }
        self.inner.delete_room(id).await
    }

    async fn find_rooms_by_mode(&self, mode: Mode) -> Result<Vec<Room>, StoreError> {
        self.room_scans.fetch_add(1, Ordering::SeqCst);
        self.inner.find_rooms_by_mode(mode).await
    }

    async fn find_players_in_room_by_region(
        &self,
        region: &Region,
    ) -> Result<Vec<Player>, StoreError> {
        self.player_scans.fetch_add(1, Ordering::SeqCst);
        self.inner.find_players_in_room_by_region(region).await
    }
}

// =========================================================================
// DownCache
// =========================================================================

/// A cache backend that is unreachable.
#[derive(Debug, Default)]
pub struct DownCache;

impl ReadCache for DownCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<CachedQuery>, CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn set(
        &self,
        _key: &CacheKey,
        _value: CachedQuery,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn invalidate_all(&self) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".into()))
    }
}

// =========================================================================
// Fixtures
// =========================================================================

pub struct Harness {
    pub repo: Arc<ProbeRepository>,
    pub cache: Arc<TtlCache>,
    pub engine: MembershipEngine<ProbeRepository, TtlCache>,
    pub trends: TrendAggregator<ProbeRepository, TtlCache>,
}

pub fn harness() -> Harness {
    harness_with(LobbyConfig::default())
}

pub fn harness_with(config: LobbyConfig) -> Harness {
    let repo = Arc::new(ProbeRepository::new());
    let cache = Arc::new(TtlCache::new());
    Harness {
        engine: MembershipEngine::new(Arc::clone(&repo), Arc::clone(&cache), config.clone()),
        trends: TrendAggregator::new(Arc::clone(&repo), Arc::clone(&cache), config),
        repo,
        cache,
    }
}

pub fn pid(id: &str) -> PlayerId {
    PlayerId::parse(id).unwrap()
}

pub fn rid(id: &str) -> RoomId {
    RoomId::parse(id).unwrap()
}

pub fn region(code: &str) -> Region {
    Region::parse(code).unwrap()
}

/// Registers each id in `region`.
pub async fn register_all(h: &Harness, ids: &[&str], code: &str) {
    for id in ids {
        h.engine.register_player(pid(id), region(code)).await.unwrap();
    }
}

/// Snapshot of the stored documents, for "state unchanged" comparisons.
pub async fn snapshot(repo: &ProbeRepository) -> (Vec<Player>, Vec<Room>) {
    (repo.inner.players().await, repo.inner.rooms().await)
}

/// Checks the membership invariants:
///
/// - a player's room is set iff exactly one room lists them, and it is
///   that room;
/// - every room has between 1 and `capacity(mode)` players;
/// - every listed player exists and points back at the room.
pub async fn assert_consistent(repo: &ProbeRepository) {
    let players = repo.inner.players().await;
    let rooms = repo.inner.rooms().await;

    let mut listings: HashMap<&PlayerId, Vec<&RoomId>> = HashMap::new();
    for room in &rooms {
        assert!(!room.player_ids.is_empty(), "room {} is empty", room.id);
        assert!(
            room.player_count() <= room.mode.capacity(),
            "room {} holds {} players, capacity {}",
            room.id,
            room.player_count(),
            room.mode.capacity()
        );
        for player_id in &room.player_ids {
            listings.entry(player_id).or_default().push(&room.id);
        }
    }

    for player in &players {
        let listed_in = listings.remove(&player.id).unwrap_or_default();
        match &player.room {
            Some(room_id) => assert_eq!(
                listed_in,
                vec![room_id],
                "player {} points at {room_id} but is listed in {listed_in:?}",
                player.id
            ),
            None => assert!(
                listed_in.is_empty(),
                "idle player {} is listed in {listed_in:?}",
                player.id
            ),
        }
    }

    assert!(listings.is_empty(), "rooms list unknown players: {listings:?}");
}
