//! Room id generation.

use lobbyforge_protocol::RoomId;
use rand::Rng;
use rand::distr::Alphanumeric;

/// Generates a random [`RoomId::LEN`]-character id from `[A-Za-z0-9]`.
///
/// 62^7 ≈ 3.5 × 10^12 possible ids. Collisions are not checked here; a
/// repository that enforces unique room ids reports one as a failed
/// insert.
pub fn generate_room_id() -> RoomId {
    let id: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RoomId::LEN)
        .map(char::from)
        .collect();
    RoomId::from_generated(id)
}
