//! Wire models for the snapshots the server hands out, one per game phase.
//!
//! All of these are cached, disposable mirrors of server state: they are
//! replaced wholesale on every successful call or subscription push and never
//! mutated field by field on the client.

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, Color};

/// An authenticated session as reported by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub name: String,
    pub admin: bool,
    /// Session expiry in epoch seconds.
    pub expire_time: i64,
}

impl UserInfo {
    /// `now` is epoch seconds. An expired session is treated as no session.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expire_time
    }
}

/// A pre-game waiting room. Vacant seats are empty strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyInfo {
    pub id: String,
    pub host: String,
    pub players: Vec<String>,
    pub started: bool,
}

/// Bidding-phase snapshot. The id doubles as the lobby/game id.
///
/// Depending on the server's privacy mode the snapshot carries either the
/// caller's `hand` or every player's `hands`; both deserialize here and the
/// absent one stays empty. Same for `widow`, which only the bid winner sees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidInfo {
    pub id: String,
    pub done: bool,
    pub players: Vec<String>,
    #[serde(default)]
    pub hand: Vec<Card>,
    #[serde(default)]
    pub hands: Vec<Vec<Card>>,
    #[serde(default)]
    pub widow: Vec<Card>,
    pub passed: Vec<bool>,
    pub current_bidder: usize,
    pub bid: i32,
}

impl BidInfo {
    /// The winning seat, known only once bidding is done.
    pub fn winner(&self) -> Option<usize> {
        self.done.then_some(self.current_bidder)
    }
}

/// In-progress play-phase snapshot, as visible to the requesting player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub id: String,
    pub done: bool,
    pub players: Vec<String>,
    pub hand: Vec<Card>,
    /// Cards played to the active trick; reset by the server between tricks.
    pub table: Vec<Card>,
    pub current_player: usize,
    /// `Color::NONE` until a trump has been declared.
    pub trump: Color,
    pub bid: i32,
    pub bid_winner: usize,
}

/// End-of-game team totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScore {
    pub score0: i32,
    pub score1: i32,
}
