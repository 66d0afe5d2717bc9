//! Room membership and regional trends for Lobbyforge.
//!
//! Rooms live in a [`Repository`](lobbyforge_store::Repository); query
//! results live in a [`ReadCache`](lobbyforge_cache::ReadCache). This crate
//! holds the rules that keep the two consistent.
//!
//! # Key types
//!
//! - [`MembershipEngine`]: register, create/join/leave rooms, list rooms
//! - [`TrendAggregator`]: top modes per region
//! - [`LobbyConfig`]: cache TTLs, leave deadline, trend size
//! - [`LobbyError`]: every failure an operation can report

mod config;
mod error;
mod membership;
mod room_id;
mod trends;

pub use config::LobbyConfig;
pub use error::LobbyError;
pub use membership::{LeftRoom, MembershipEngine};
pub use room_id::generate_room_id;
pub use trends::{rank_modes, TrendAggregator};
