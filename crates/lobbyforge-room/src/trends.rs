//! Regional mode trends: which modes the players of a region are in.

use std::collections::HashMap;
use std::sync::Arc;

use lobbyforge_cache::{CacheError, CacheKey, CachedQuery, ReadCache};
use lobbyforge_protocol::{Mode, ModeTrend, PlayerId, Region, RoomId};
use lobbyforge_store::{Repository, StoreError};

use crate::{LobbyConfig, LobbyError};

/// Computes and caches top-N mode reports per region.
pub struct TrendAggregator<R: Repository, C: ReadCache> {
    repo: Arc<R>,
    cache: Arc<C>,
    config: LobbyConfig,
}

impl<R: Repository, C: ReadCache> TrendAggregator<R, C> {
    pub fn new(repo: Arc<R>, cache: Arc<C>, config: LobbyConfig) -> Self {
        Self { repo, cache, config }
    }

    /// Returns the most played modes in `region`, most popular first.
    ///
    /// A cache miss counts every in-room player of the region by their
    /// room's mode. The result is cached only when the count succeeded.
    pub async fn region_trends(&self, region: &Region) -> Result<Vec<ModeTrend>, LobbyError> {
        let key = CacheKey::TrendsByRegion(region.clone());
        if let Some(trends) = self.cached_trends(&key).await? {
            return Ok(trends);
        }

        let counts = self.count_modes(region).await?;
        let trends = rank_modes(counts, self.config.trend_size);

        self.cache
            .set(&key, CachedQuery::Trends(trends.clone()), self.config.trend_ttl)
            .await?;
        Ok(trends)
    }

    /// Same report as [`region_trends`](Self::region_trends) for the
    /// player's region, cached under the player's id.
    ///
    /// Two players of the same region therefore hold separate entries.
    pub async fn player_region_trends(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<ModeTrend>, LobbyError> {
        let key = CacheKey::TrendsByPlayer(player_id.clone());
        if let Some(trends) = self.cached_trends(&key).await? {
            return Ok(trends);
        }

        let player = self.repo.get_player(player_id).await?;
        let trends = self.region_trends(&player.region).await?;

        self.cache
            .set(&key, CachedQuery::Trends(trends.clone()), self.config.trend_ttl)
            .await?;
        Ok(trends)
    }

    async fn cached_trends(&self, key: &CacheKey) -> Result<Option<Vec<ModeTrend>>, LobbyError> {
        match self.cache.get(key).await? {
            Some(cached) => {
                tracing::debug!(%key, "cache hit");
                cached
                    .into_trends()
                    .map(Some)
                    .ok_or_else(|| LobbyError::Cache(CacheError::ShapeMismatch(key.to_string())))
            }
            None => {
                tracing::debug!(%key, "cache miss");
                Ok(None)
            }
        }
    }

    async fn count_modes(&self, region: &Region) -> Result<HashMap<Mode, usize>, LobbyError> {
        let players = self.repo.find_players_in_room_by_region(region).await?;

        // Rooms are looked up once each, however many of the region's
        // players share them. `None` marks a room that vanished.
        let mut room_modes: HashMap<RoomId, Option<Mode>> = HashMap::new();
        let mut counts: HashMap<Mode, usize> = HashMap::new();

        for player in players {
            let Some(room_id) = player.room else {
                continue;
            };

            let mode = match room_modes.get(&room_id) {
                Some(mode) => *mode,
                None => {
                    let mode = match self.repo.get_room(&room_id).await {
                        Ok(room) => Some(room.mode),
                        Err(StoreError::RoomNotFound(_)) => {
                            // Left (and the room was deleted) between
                            // the scan and this lookup.
                            tracing::warn!(
                                player_id = %player.id,
                                %room_id,
                                "player references a missing room, skipped"
                            );
                            None
                        }
                        Err(e) => return Err(e.into()),
                    };
                    room_modes.insert(room_id, mode);
                    mode
                }
            };

            if let Some(mode) = mode {
                *counts.entry(mode).or_default() += 1;
            }
        }

        tracing::debug!(%region, rooms = room_modes.len(), "modes counted");
        Ok(counts)
    }
}

/// Orders mode counts by descending count and keeps the first `limit`.
///
/// Equal counts are ordered by ascending canonical mode name, so the same
/// counts always produce the same report.
pub fn rank_modes(counts: impl IntoIterator<Item = (Mode, usize)>, limit: usize) -> Vec<ModeTrend> {
    let mut trends: Vec<ModeTrend> = counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(mode, count)| ModeTrend { mode, count })
        .collect();
    trends.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.mode.as_str().cmp(b.mode.as_str()))
    });
    trends.truncate(limit);
    trends
}
