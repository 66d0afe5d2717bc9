//! Cache keys and payloads.
//!
//! Each cacheable query has its own key variant and its own payload
//! variant, so a room listing can't be read back as a trend report by
//! accident.

use std::fmt;

use lobbyforge_protocol::{Mode, ModeTrend, PlayerId, Region, RoomId};
use serde::{Deserialize, Serialize};

/// Identifies a cached query.
///
/// `Display` renders the query signature used as the backend key, e.g.
/// `GetRoomsByMode:gunsmith`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Room ids for one mode.
    RoomsByMode(Mode),
    /// Top modes for one region.
    TrendsByRegion(Region),
    /// Top modes for a player's region, cached per player.
    TrendsByPlayer(PlayerId),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoomsByMode(mode) => write!(f, "GetRoomsByMode:{mode}"),
            Self::TrendsByRegion(region) => write!(f, "GetModesTrendByRegion:{region}"),
            Self::TrendsByPlayer(player) => write!(f, "GetModesTrendByPlayerRegion:{player}"),
        }
    }
}

/// A cached query result.
///
/// Adjacently tagged, so an encoded entry reads as
/// `{ "type": "RoomIds", "data": ["aB3dE5g"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CachedQuery {
    RoomIds(Vec<RoomId>),
    Trends(Vec<ModeTrend>),
}

impl CachedQuery {
    /// Returns the room ids, or `None` if this is a different shape.
    pub fn into_room_ids(self) -> Option<Vec<RoomId>> {
        match self {
            Self::RoomIds(ids) => Some(ids),
            _ => None,
        }
    }

    /// Returns the trend report, or `None` if this is a different shape.
    pub fn into_trends(self) -> Option<Vec<ModeTrend>> {
        match self {
            Self::Trends(trends) => Some(trends),
            _ => None,
        }
    }
}
