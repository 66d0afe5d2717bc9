use lobbyforge::prelude::*;

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// Two players share a room, then leave it one after the other.
async fn two_player_room(lobby: &Lobby) -> Result<(), LobbyError> {
    lobby.register_player("p1", "USA").await?;
    lobby.register_player("p2", "USA").await?;

    let room_id = lobby.create_room("p1", "gunsmith").await?;
    tracing::info!(%room_id, rooms = ?lobby.list_rooms("gunsmith").await?, "gunsmith rooms");

    lobby.join_room("p2", room_id.as_str()).await?;
    print_json("room", &lobby.room(room_id.as_str()).await?);
    print_json("USA trends", &lobby.region_trends("USA").await?);

    print_json("p1 leaves", &lobby.leave_room("p1").await?);
    print_json("p2 leaves", &lobby.leave_room("p2").await?);

    match lobby.room(room_id.as_str()).await {
        Err(LobbyError::RoomNotFound(_)) => tracing::info!(%room_id, "room is gone"),
        other => tracing::warn!(?other, "room should have been deleted"),
    }
    Ok(())
}

/// A few rejected requests and the status codes a transport would send.
async fn rejections(lobby: &Lobby) {
    let attempts = [
        ("duplicate registration", lobby.register_player("p1", "BRA").await.map(drop)),
        ("unknown mode", lobby.create_room("p1", "capture the flag").await.map(drop)),
        ("leave while idle", lobby.leave_room("p1").await.map(drop)),
        ("bad region", lobby.region_trends("north").await.map(drop)),
    ];
    for (label, result) in attempts {
        if let Err(e) = result {
            println!("{label}: {} {e}", e.status_code());
        }
    }
}

fn print_json<T: serde::Serialize>(label: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{label}: {json}"),
        Err(e) => tracing::error!(error = %e, "failed to encode {label}"),
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), LobbyError> {
    lobbyforge::telemetry::init_tracing();

    let lobby = Lobby::builder().build_in_memory();
    two_player_room(&lobby).await?;
    rejections(&lobby).await;

    Ok(())
}
