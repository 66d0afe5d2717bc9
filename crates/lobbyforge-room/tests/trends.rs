//! Regional trend reports over a populated lobby.

mod common;

use common::{harness, harness_with, pid, region, register_all, rid, Harness};
use lobbyforge_cache::{CacheKey, CachedQuery, ReadCache};
use lobbyforge_protocol::{Mode, ModeTrend, RoomId};
use lobbyforge_room::{LobbyConfig, LobbyError};
use lobbyforge_store::Repository;

fn trend(mode: Mode, count: usize) -> ModeTrend {
    ModeTrend { mode, count }
}

/// USA: GunSmith 2, 1 v 1 2, Mayhem 1, Battle Royale 1 (one idle player).
/// BRA: Team Deathmatch 1.
async fn populate(h: &Harness) -> Vec<RoomId> {
    register_all(h, &["p1", "p2", "p3", "p4", "p5", "p6", "idle"], "USA").await;
    register_all(h, &["b1"], "BRA").await;

    let gunsmith = h.engine.create_room(&pid("p1"), Mode::GunSmith).await.unwrap();
    h.engine.join_room(&pid("p2"), &gunsmith).await.unwrap();
    let mayhem = h.engine.create_room(&pid("p3"), Mode::Mayhem).await.unwrap();
    let duel = h.engine.create_room(&pid("p4"), Mode::OneVsOne).await.unwrap();
    h.engine.join_room(&pid("p5"), &duel).await.unwrap();
    let royale = h.engine.create_room(&pid("p6"), Mode::BattleRoyale).await.unwrap();
    let tdm = h.engine.create_room(&pid("b1"), Mode::TeamDeathmatch).await.unwrap();

    vec![gunsmith, mayhem, duel, royale, tdm]
}

#[tokio::test]
async fn test_region_trends_top_three() {
    let h = harness();
    populate(&h).await;

    let trends = h.trends.region_trends(&region("USA")).await.unwrap();
    assert_eq!(
        trends,
        vec![
            trend(Mode::OneVsOne, 2),
            trend(Mode::GunSmith, 2),
            trend(Mode::BattleRoyale, 1),
        ]
    );

    let trends = h.trends.region_trends(&region("bra")).await.unwrap();
    assert_eq!(trends, vec![trend(Mode::TeamDeathmatch, 1)]);
}

#[tokio::test]
async fn test_region_trends_respects_trend_size() {
    let h = harness_with(LobbyConfig {
        trend_size: 1,
        ..LobbyConfig::default()
    });
    populate(&h).await;

    let trends = h.trends.region_trends(&region("USA")).await.unwrap();
    assert_eq!(trends, vec![trend(Mode::OneVsOne, 2)]);
}

#[tokio::test]
async fn test_region_trends_empty_region() {
    let h = harness();
    populate(&h).await;

    let trends = h.trends.region_trends(&region("JPN")).await.unwrap();
    assert!(trends.is_empty());

    // Empty reports are cached like any other.
    h.trends.region_trends(&region("JPN")).await.unwrap();
    assert_eq!(h.repo.player_scans(), 1);
}

#[tokio::test]
async fn test_region_trends_served_from_cache() {
    let h = harness();
    populate(&h).await;

    let first = h.trends.region_trends(&region("USA")).await.unwrap();
    let second = h.trends.region_trends(&region("USA")).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(h.repo.player_scans(), 1);

    let cached = h
        .cache
        .get(&CacheKey::TrendsByRegion(region("USA")))
        .await
        .unwrap();
    assert_eq!(cached, Some(CachedQuery::Trends(first)));
}

#[tokio::test]
async fn test_region_trends_looks_up_each_room_once() {
    let h = harness();
    register_all(&h, &["p1", "p2", "p3", "p4", "p5"], "USA").await;
    let room_id = h.engine.create_room(&pid("p1"), Mode::BattleRoyale).await.unwrap();
    for id in ["p2", "p3", "p4", "p5"] {
        h.engine.join_room(&pid(id), &room_id).await.unwrap();
    }

    let before = h.repo.room_lookups();
    let trends = h.trends.region_trends(&region("USA")).await.unwrap();
    assert_eq!(trends, vec![trend(Mode::BattleRoyale, 5)]);
    assert_eq!(h.repo.room_lookups() - before, 1);
}

#[tokio::test]
async fn test_region_trends_recomputed_after_mutation() {
    let h = harness();
    let rooms = populate(&h).await;
    let mayhem = &rooms[1];

    h.trends.region_trends(&region("USA")).await.unwrap();

    // Mayhem overtakes everything.
    register_all(&h, &["m1", "m2"], "USA").await;
    h.engine.join_room(&pid("m1"), mayhem).await.unwrap();
    h.engine.join_room(&pid("m2"), mayhem).await.unwrap();

    let trends = h.trends.region_trends(&region("USA")).await.unwrap();
    assert_eq!(trends[0], trend(Mode::Mayhem, 3));
    assert_eq!(h.repo.player_scans(), 2);
}

#[tokio::test]
async fn test_region_trends_skips_missing_room() {
    let h = harness();
    populate(&h).await;

    // A player whose room vanished between the scan and the lookup.
    h.repo
        .inner
        .update_player_room(&pid("idle"), Some(&rid("gone123")))
        .await
        .unwrap();

    let trends = h.trends.region_trends(&region("USA")).await.unwrap();
    assert_eq!(
        trends,
        vec![
            trend(Mode::OneVsOne, 2),
            trend(Mode::GunSmith, 2),
            trend(Mode::BattleRoyale, 1),
        ]
    );
}

#[tokio::test]
async fn test_player_region_trends_uses_player_region() {
    let h = harness();
    populate(&h).await;

    let usa = h.trends.region_trends(&region("USA")).await.unwrap();
    assert_eq!(h.trends.player_region_trends(&pid("idle")).await.unwrap(), usa);

    let bra = h.trends.player_region_trends(&pid("b1")).await.unwrap();
    assert_eq!(bra, vec![trend(Mode::TeamDeathmatch, 1)]);
}

#[tokio::test]
async fn test_player_region_trends_cached_per_player() {
    let h = harness();
    populate(&h).await;

    h.trends.player_region_trends(&pid("p1")).await.unwrap();
    // The player entry and the region entry it was computed from.
    assert_eq!(h.cache.len().await, 2);
    assert!(
        h.cache
            .get(&CacheKey::TrendsByPlayer(pid("p1")))
            .await
            .unwrap()
            .is_some()
    );

    // Same region, different player: a new entry, but no new scan.
    h.trends.player_region_trends(&pid("p2")).await.unwrap();
    assert_eq!(h.cache.len().await, 3);
    assert_eq!(h.repo.player_scans(), 1);
}

#[tokio::test]
async fn test_player_region_trends_unknown_player() {
    let h = harness();
    populate(&h).await;

    let err = h.trends.player_region_trends(&pid("ghost")).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(matches!(err, LobbyError::PlayerNotFound(ref id) if *id == pid("ghost")));
    assert!(h.cache.get(&CacheKey::TrendsByPlayer(pid("ghost"))).await.unwrap().is_none());
}
