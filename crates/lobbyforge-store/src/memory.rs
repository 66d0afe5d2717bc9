//! In-memory repository: two hash maps behind Tokio read/write locks.
//!
//! Each trait method takes the lock for exactly one collection, which gives
//! the same per-document atomicity a real document store offers and no
//! more. In particular a "player update then room update" sequence can
//! interleave with other callers, just as it would against a database.

use std::collections::HashMap;

use lobbyforge_protocol::{Mode, Player, PlayerId, Region, Room, RoomId};
use tokio::sync::RwLock;

use crate::{Repository, StoreError};

/// A [`Repository`] that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    players: RwLock<HashMap<PlayerId, Player>>,
    rooms: RwLock<HashMap<RoomId, Room>>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every player, sorted by id.
    pub async fn players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.read().await.values().cloned().collect();
        players.sort_by(|a, b| a.id.cmp(&b.id));
        players
    }

    /// Returns a snapshot of every room, sorted by id.
    pub async fn rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.read().await.values().cloned().collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }

    /// Number of stored rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl Repository for InMemoryRepository {
    async fn get_player(&self, id: &PlayerId) -> Result<Player, StoreError> {
        self.players
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::PlayerNotFound(id.clone()))
    }

    async fn player_exists(&self, id: &PlayerId) -> Result<bool, StoreError> {
        Ok(self.players.read().await.contains_key(id))
    }

    async fn insert_player(&self, id: &PlayerId, region: &Region) -> Result<(), StoreError> {
        let mut players = self.players.write().await;
        if players.contains_key(id) {
            return Err(StoreError::DuplicatePlayer(id.clone()));
        }
        players.insert(id.clone(), Player::new(id.clone(), region.clone()));
        tracing::trace!(player_id = %id, %region, "player document inserted");
        Ok(())
    }

    async fn get_room(&self, id: &RoomId) -> Result<Room, StoreError> {
        self.rooms
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::RoomNotFound(id.clone()))
    }

    async fn insert_room(&self, room: Room) -> Result<(), StoreError> {
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&room.id) {
            return Err(StoreError::DuplicateRoom(room.id));
        }
        tracing::trace!(room_id = %room.id, mode = %room.mode, "room document inserted");
        rooms.insert(room.id.clone(), room);
        Ok(())
    }

    async fn update_player_room(
        &self,
        id: &PlayerId,
        room: Option<&RoomId>,
    ) -> Result<(), StoreError> {
        let mut players = self.players.write().await;
        let player = players
            .get_mut(id)
            .ok_or_else(|| StoreError::PlayerNotFound(id.clone()))?;
        player.room = room.cloned();
        Ok(())
    }

    async fn add_player_to_room(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<Room, StoreError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.clone()))?;
        room.player_ids.insert(player_id.clone());
        Ok(room.clone())
    }

    async fn remove_player_from_room(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<Room, StoreError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.clone()))?;
        room.player_ids.remove(player_id);
        Ok(room.clone())
    }

    async fn delete_room(&self, id: &RoomId) -> Result<(), StoreError> {
        if self.rooms.write().await.remove(id).is_some() {
            tracing::trace!(room_id = %id, "room document deleted");
        }
        Ok(())
    }

    async fn find_rooms_by_mode(&self, mode: Mode) -> Result<Vec<Room>, StoreError> {
        let mut rooms: Vec<Room> = self
            .rooms
            .read()
            .await
            .values()
            .filter(|room| room.mode == mode)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rooms)
    }

    async fn find_players_in_room_by_region(
        &self,
        region: &Region,
    ) -> Result<Vec<Player>, StoreError> {
        let mut players: Vec<Player> = self
            .players
            .read()
            .await
            .values()
            .filter(|player| player.room.is_some() && &player.region == region)
            .cloned()
            .collect();
        players.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(players)
    }
}

// =========================================================================
// Tests
// =========================================================================
