//! Shared wiring and fixtures for the client integration tests.

#![allow(dead_code)]

use std::time::Duration;

use client_test_support::mock_server::MockGameServer;
use client_test_support::test_logging;
use rook_client::{ApiClient, BidInfo, Card, ClientConfig, Color, GameInfo, LobbyInfo};
use serde_json::{json, Value};

/// Generous bound for waiting on pushed events in tests.
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(2);

/// Session expiry far enough out that tests never race it.
pub const UNEXPIRED: i64 = 4_102_444_800;

pub async fn start_server() -> MockGameServer {
    test_logging::init();
    MockGameServer::spawn().await
}

pub fn client_for(server: &MockGameServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(server.base_url()))
}

pub fn players() -> Vec<String> {
    vec!["alice".into(), "bob".into(), "carol".into(), "dan".into()]
}

pub fn lobby_fixture(id: &str) -> LobbyInfo {
    LobbyInfo {
        id: id.to_string(),
        host: "alice".to_string(),
        players: players(),
        started: false,
    }
}

pub fn lobby_json(id: &str) -> Value {
    json!({
        "id": id,
        "host": "alice",
        "players": ["alice", "bob", "carol", "dan"],
        "started": false,
    })
}

pub fn bid_fixture(id: &str) -> BidInfo {
    BidInfo {
        id: id.to_string(),
        done: false,
        players: players(),
        hand: vec![Card::new(Color::RED, 5), Card::new(Color::BLACK, 1)],
        hands: Vec::new(),
        widow: Vec::new(),
        passed: vec![false, false, false, false],
        current_bidder: 0,
        bid: 70,
    }
}

pub fn bid_json(id: &str) -> Value {
    json!({
        "id": id,
        "done": false,
        "players": ["alice", "bob", "carol", "dan"],
        "hand": [
            {"color": 1, "value": 5},
            {"color": 4, "value": 1},
        ],
        "passed": [false, false, false, false],
        "currentBidder": 0,
        "bid": 70,
    })
}

pub fn game_fixture(id: &str) -> GameInfo {
    GameInfo {
        id: id.to_string(),
        done: false,
        players: players(),
        hand: vec![Card::new(Color::GREEN, 10), Card::ROOK],
        table: Vec::new(),
        current_player: 1,
        trump: Color::GREEN,
        bid: 95,
        bid_winner: 1,
    }
}

pub fn game_json(id: &str) -> Value {
    json!({
        "id": id,
        "done": false,
        "players": ["alice", "bob", "carol", "dan"],
        "hand": [
            {"color": 3, "value": 10},
            {"color": 0, "value": 0},
        ],
        "table": [],
        "currentPlayer": 1,
        "trump": 3,
        "bid": 95,
        "bidWinner": 1,
    })
}
