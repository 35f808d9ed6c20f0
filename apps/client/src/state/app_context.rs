//! Application state shared between resource clients and presentation code.

use std::sync::Arc;

use crate::domain::models::{BidInfo, GameInfo, LobbyInfo, UserInfo};
use crate::state::cell::StateCell;

/// The four phase snapshots a client session can hold.
///
/// The cells are independent: there is no ordering or transactional guarantee
/// across them, and during a phase transition (lobby to bidding to game) they
/// can be transiently inconsistent with each other. Consumers read whichever
/// cell their screen needs and must tolerate the others lagging behind.
#[derive(Default)]
pub struct AppContext {
    pub user: StateCell<UserInfo>,
    pub lobby: StateCell<LobbyInfo>,
    pub bid: StateCell<BidInfo>,
    pub game: StateCell<GameInfo>,
}

impl AppContext {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}
