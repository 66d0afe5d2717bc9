//! Lobby configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for the membership engine and trend aggregator.
///
/// The defaults match production: five-minute cache entries, a ten-second
/// budget for leaving a room, and a top-3 trend report. Override only the
/// fields you care about:
///
/// ```rust
/// use std::time::Duration;
/// use lobbyforge_room::LobbyConfig;
///
/// let config = LobbyConfig {
///     room_list_ttl: Duration::from_secs(30),
///     ..LobbyConfig::default()
/// };
/// assert_eq!(config.trend_size, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyConfig {
    /// How long a room listing for one mode stays cached.
    pub room_list_ttl: Duration,

    /// How long a trend report (per region or per player) stays cached.
    pub trend_ttl: Duration,

    /// Upper bound on a whole leave-room operation.
    pub leave_deadline: Duration,

    /// How many modes a trend report contains at most.
    pub trend_size: usize,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            room_list_ttl: Duration::from_secs(5 * 60),
            trend_ttl: Duration::from_secs(5 * 60),
            leave_deadline: Duration::from_secs(10),
            trend_size: 3,
        }
    }
}
