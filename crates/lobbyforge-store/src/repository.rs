//! The `Repository` trait: the seam between membership rules and storage.
//!
//! Lobbyforge doesn't ship a database driver. Production deployments
//! implement this trait over their document store (each method maps to a
//! single find / insert / update / delete on one collection), tests use
//! [`InMemoryRepository`](crate::InMemoryRepository) or wrap it to inject
//! faults.
//!
//! # Why a trait?
//!
//! The membership rules are the same whatever holds the documents. A trait
//! describes WHAT the engine needs from storage without fixing HOW:
//! - a document database in production
//! - [`InMemoryRepository`](crate::InMemoryRepository) in the demo and tests
//! - a wrapper that fails on command, to exercise the rollback paths
//!
//! All without changing the engine.
//!
//! # Why `impl Future + Send` instead of `async fn`?
//!
//! An `async fn` in a trait returns a future whose `Send`-ness the caller
//! can't name. Code generic over `R: Repository` would then be unable to
//! hand its futures to `tokio::spawn`, which requires `Send`. Spelling the
//! return type out as `impl Future<Output = ...> + Send` puts that
//! guarantee in the contract. Implementors still write plain `async fn`;
//! the compiler checks that the body's future is `Send`.

use std::future::Future;

use lobbyforge_protocol::{Mode, Player, PlayerId, Region, Room, RoomId};

use crate::StoreError;

/// Persistent store for [`Player`] and [`Room`] documents.
///
/// # Trait bounds
///
/// - `Send + Sync`: one repository is shared, behind an `Arc`, by the
///   membership engine and the trend aggregator, and called from any
///   Tokio worker thread.
/// - `'static`: it borrows nothing and lives as long as the lobby.
///
/// Every method touches exactly one document (or one scan) and is assumed
/// atomic at that level. Nothing here spans two documents; callers that
/// need "update player, then update room" must handle partial failure
/// themselves.
///
/// # Example
///
/// ```rust,ignore
/// use lobbyforge_protocol::{PlayerId, Region};
/// use lobbyforge_store::{InMemoryRepository, Repository};
///
/// let repo = InMemoryRepository::new();
/// let id = PlayerId::parse("p1")?;
/// repo.insert_player(&id, &Region::parse("USA")?).await?;
/// assert!(repo.player_exists(&id).await?);
/// ```
pub trait Repository: Send + Sync + 'static {
    /// Fetches a player by id.
    ///
    /// # Errors
    /// [`StoreError::PlayerNotFound`] if no such player exists.
    fn get_player(
        &self,
        id: &PlayerId,
    ) -> impl Future<Output = Result<Player, StoreError>> + Send;

    /// Returns `true` if a player with this id is registered.
    fn player_exists(
        &self,
        id: &PlayerId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Inserts an idle player.
    ///
    /// # Errors
    /// [`StoreError::DuplicatePlayer`] if the id is already taken.
    fn insert_player(
        &self,
        id: &PlayerId,
        region: &Region,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fetches a room by id.
    ///
    /// # Errors
    /// [`StoreError::RoomNotFound`] if no such room exists.
    fn get_room(
        &self,
        id: &RoomId,
    ) -> impl Future<Output = Result<Room, StoreError>> + Send;

    /// Inserts a new room document.
    ///
    /// # Errors
    /// [`StoreError::DuplicateRoom`] if the id is already taken.
    fn insert_room(
        &self,
        room: Room,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Sets (or, with `None`, clears) a player's room field.
    ///
    /// # Errors
    /// [`StoreError::PlayerNotFound`] if no such player exists.
    fn update_player_room(
        &self,
        id: &PlayerId,
        room: Option<&RoomId>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Adds a player to a room's roster (set semantics) and returns the
    /// updated room.
    ///
    /// Does not check capacity; that is the caller's rule to enforce.
    ///
    /// # Errors
    /// [`StoreError::RoomNotFound`] if no such room exists.
    fn add_player_to_room(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> impl Future<Output = Result<Room, StoreError>> + Send;

    /// Removes a player from a room's roster and returns the updated room,
    /// which may now be empty.
    ///
    /// # Errors
    /// [`StoreError::RoomNotFound`] if no such room exists.
    fn remove_player_from_room(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> impl Future<Output = Result<Room, StoreError>> + Send;

    /// Deletes a room. Deleting a room that is already gone is not an
    /// error.
    fn delete_room(
        &self,
        id: &RoomId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Returns every room bound to `mode`.
    fn find_rooms_by_mode(
        &self,
        mode: Mode,
    ) -> impl Future<Output = Result<Vec<Room>, StoreError>> + Send;

    /// Returns every player in `region` whose room field is set.
    fn find_players_in_room_by_region(
        &self,
        region: &Region,
    ) -> impl Future<Output = Result<Vec<Player>, StoreError>> + Send;
}
