//! Membership engine: registers players and moves them in and out of rooms.
//!
//! Every multi-step operation here performs two independent document
//! writes (player, then room) with no transaction around them. When the
//! second write fails the first is undone with a compensating write. That
//! protects against partial failure, not against concurrent interleaving:
//! two joins racing for the last slot of a room can both succeed.
//!
//! Every mutation flushes the whole read-cache.

use std::sync::Arc;

use lobbyforge_cache::{CacheError, CacheKey, CachedQuery, ReadCache};
use lobbyforge_protocol::{MembershipState, Mode, Player, PlayerId, Region, Room, RoomId};
use lobbyforge_store::Repository;
use serde::{Deserialize, Serialize};

use crate::{generate_room_id, LobbyConfig, LobbyError};

/// Outcome of a successful leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeftRoom {
    /// The room the player left.
    pub room_id: RoomId,
    /// `true` if the player was the last member and the room was deleted.
    pub room_closed: bool,
}

/// Enforces the player/room lifecycle.
///
/// Holds no lock and no mutable state of its own; it is `Send + Sync`
/// and is meant to be shared (behind an `Arc`) by every request handler.
pub struct MembershipEngine<R: Repository, C: ReadCache> {
    repo: Arc<R>,
    cache: Arc<C>,
    config: LobbyConfig,
}

impl<R: Repository, C: ReadCache> MembershipEngine<R, C> {
    /// Creates an engine over a shared repository and cache.
    pub fn new(repo: Arc<R>, cache: Arc<C>, config: LobbyConfig) -> Self {
        Self { repo, cache, config }
    }

    pub fn config(&self) -> &LobbyConfig {
        &self.config
    }

    /// Registers a new, idle player.
    ///
    /// Leaves the cache alone: an idle player appears in no room listing
    /// and no trend report.
    ///
    /// # Errors
    /// [`LobbyError::DuplicatePlayer`] if the id is taken.
    pub async fn register_player(
        &self,
        id: PlayerId,
        region: Region,
    ) -> Result<Player, LobbyError> {
        if self.repo.player_exists(&id).await? {
            return Err(LobbyError::DuplicatePlayer(id));
        }
        // A concurrent registration can still win between the check and
        // the insert; the store reports that as DuplicatePlayer too.
        self.repo.insert_player(&id, &region).await?;
        tracing::info!(player_id = %id, %region, "player registered");
        Ok(Player::new(id, region))
    }

    /// Creates a room with `player_id` as its only member and returns the
    /// new room's id.
    ///
    /// Checks, in order: the player exists, the mode is known, the player
    /// is idle.
    pub async fn create_room(
        &self,
        player_id: &PlayerId,
        mode: Mode,
    ) -> Result<RoomId, LobbyError> {
        let player = self.repo.get_player(player_id).await?;
        if !mode.is_known() {
            return Err(LobbyError::InvalidMode);
        }
        ensure_can_enter(&player)?;

        let room_id = generate_room_id();
        self.repo.update_player_room(player_id, Some(&room_id)).await?;

        let room = Room::new(room_id.clone(), mode, player_id.clone());
        if let Err(e) = self.repo.insert_room(room).await {
            self.rollback_player_room(player_id, &room_id).await;
            return Err(e.into());
        }

        self.cache.invalidate_all().await?;
        tracing::info!(%player_id, %room_id, %mode, "room created");
        Ok(room_id)
    }

    /// Lists the ids of every room bound to `mode`.
    ///
    /// Served from the cache when possible; a miss scans the repository
    /// and caches the result for [`LobbyConfig::room_list_ttl`].
    pub async fn list_rooms_by_mode(&self, mode: Mode) -> Result<Vec<RoomId>, LobbyError> {
        if !mode.is_known() {
            return Err(LobbyError::InvalidMode);
        }

        let key = CacheKey::RoomsByMode(mode);
        if let Some(cached) = self.cache.get(&key).await? {
            tracing::debug!(%key, "cache hit");
            return cached
                .into_room_ids()
                .ok_or_else(|| LobbyError::Cache(CacheError::ShapeMismatch(key.to_string())));
        }
        tracing::debug!(%key, "cache miss");

        let room_ids: Vec<RoomId> = self
            .repo
            .find_rooms_by_mode(mode)
            .await?
            .into_iter()
            .map(|room| room.id)
            .collect();

        self.cache
            .set(&key, CachedQuery::RoomIds(room_ids.clone()), self.config.room_list_ttl)
            .await?;
        Ok(room_ids)
    }

    /// Adds an idle player to an existing room.
    ///
    /// Checks, in order: the player exists, the room exists, the room has
    /// a free slot, the player is idle.
    pub async fn join_room(
        &self,
        player_id: &PlayerId,
        room_id: &RoomId,
    ) -> Result<(), LobbyError> {
        let player = self.repo.get_player(player_id).await?;
        let room = self.repo.get_room(room_id).await?;
        if room.is_full() {
            return Err(LobbyError::RoomFull(room.id));
        }
        ensure_can_enter(&player)?;

        self.cache.invalidate_all().await?;
        self.repo.update_player_room(player_id, Some(room_id)).await?;

        match self.repo.add_player_to_room(room_id, player_id).await {
            Ok(room) => {
                tracing::info!(
                    %player_id,
                    %room_id,
                    players = room.player_count(),
                    capacity = room.mode.capacity(),
                    "player joined room"
                );
                Ok(())
            }
            Err(e) => {
                self.rollback_player_room(player_id, room_id).await;
                Err(e.into())
            }
        }
    }

    /// Removes a player from their room, deleting the room if they were
    /// its last member.
    ///
    /// The whole operation is bounded by [`LobbyConfig::leave_deadline`].
    /// If the emptied room cannot be deleted, the player is put back on its
    /// roster and the storage error is returned.
    pub async fn leave_room(&self, player_id: &PlayerId) -> Result<LeftRoom, LobbyError> {
        tokio::time::timeout(self.config.leave_deadline, self.leave_room_inner(player_id))
            .await
            .map_err(|_| {
                tracing::warn!(%player_id, "leave room exceeded its deadline");
                LobbyError::DeadlineExceeded
            })?
    }

    async fn leave_room_inner(&self, player_id: &PlayerId) -> Result<LeftRoom, LobbyError> {
        let player = self.repo.get_player(player_id).await?;
        let state = player.membership();
        let room_id = match player.room {
            Some(room_id) if state.can_transition_to(MembershipState::Idle) => room_id,
            _ => return Err(LobbyError::PlayerNotInRoom(player_id.clone())),
        };

        self.cache.invalidate_all().await?;

        // Room first: if this fails the player keeps pointing at a room
        // that still lists them.
        let room = self.repo.remove_player_from_room(&room_id, player_id).await?;
        let room_closed = room.player_ids.is_empty();
        if room_closed {
            if let Err(e) = self.repo.delete_room(&room_id).await {
                // An empty room must not stay visible: put the player back
                // so the roster and the player's room field agree again.
                self.rollback_room_removal(player_id, &room_id).await;
                return Err(e.into());
            }
            tracing::info!(%room_id, "last player left, room deleted");
        }

        self.repo.update_player_room(player_id, None).await?;
        tracing::info!(%player_id, %room_id, "player left room");
        Ok(LeftRoom { room_id, room_closed })
    }

    /// Fetches a player straight from the repository.
    pub async fn player(&self, id: &PlayerId) -> Result<Player, LobbyError> {
        Ok(self.repo.get_player(id).await?)
    }

    /// Fetches a room straight from the repository.
    pub async fn room(&self, id: &RoomId) -> Result<Room, LobbyError> {
        Ok(self.repo.get_room(id).await?)
    }

    /// Compensating write: re-adds a player to the roster they were just
    /// removed from, after the room could not be deleted. Failures are
    /// logged and swallowed like [`rollback_player_room`](Self::rollback_player_room).
    async fn rollback_room_removal(&self, player_id: &PlayerId, room_id: &RoomId) {
        match self.repo.add_player_to_room(room_id, player_id).await {
            Ok(_) => {
                tracing::warn!(%player_id, %room_id, "room delete failed, player restored to roster");
            }
            Err(e) => {
                tracing::error!(
                    %player_id,
                    %room_id,
                    error = %e,
                    "rollback failed, empty room may remain listed"
                );
            }
        }
    }

    /// Compensating write: clears a player's room field after the dependent
    /// room write failed. A failure here is logged and swallowed so the
    /// caller still sees the original error.
    async fn rollback_player_room(&self, player_id: &PlayerId, room_id: &RoomId) {
        match self.repo.update_player_room(player_id, None).await {
            Ok(()) => {
                tracing::warn!(%player_id, %room_id, "room write failed, player room field rolled back");
            }
            Err(e) => {
                tracing::error!(
                    %player_id,
                    %room_id,
                    error = %e,
                    "rollback failed, player may reference a room that does not list them"
                );
            }
        }
    }
}

/// Rejects a create or join by a player who already belongs to a room.
fn ensure_can_enter(player: &Player) -> Result<(), LobbyError> {
    match &player.room {
        Some(current) if !player.membership().can_transition_to(MembershipState::InRoom) => Err(
            LobbyError::PlayerAlreadyInRoom(player.id.clone(), current.clone()),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(room: Option<&str>) -> Player {
        Player {
            id: PlayerId::parse("p1").unwrap(),
            region: Region::parse("USA").unwrap(),
            room: room.map(|r| RoomId::parse(r).unwrap()),
        }
    }

    #[test]
    fn test_ensure_can_enter_idle_player() {
        assert!(ensure_can_enter(&player(None)).is_ok());
    }

    #[test]
    fn test_ensure_can_enter_rejects_player_in_room() {
        let err = ensure_can_enter(&player(Some("abcdefg"))).unwrap_err();
        assert!(matches!(
            err,
            LobbyError::PlayerAlreadyInRoom(_, ref room) if room.as_str() == "abcdefg"
        ));
    }
}
