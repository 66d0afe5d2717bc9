//! Domain vocabulary for Lobbyforge.
//!
//! This crate defines the types every other layer speaks:
//!
//! - **Identity** ([`PlayerId`], [`RoomId`], [`Region`]): newtypes that keep
//!   a player id from being passed where a room id is expected.
//! - **Documents** ([`Player`], [`Room`]): the two persisted entities.
//! - **Modes** ([`Mode`]): the closed set of game variants and their
//!   capacities.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how payloads are turned
//!   into bytes for stores that only hold opaque blobs (the read-cache).
//!
//! # Architecture
//!
//! ```text
//! Facade (strings) → Protocol (typed ids) → Room engine → Store / Cache
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    MembershipState, Mode, ModeTrend, Player, PlayerId, Region, Room, RoomId,
};
