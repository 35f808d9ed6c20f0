#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod realtime;
pub mod state;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use client::{ApiClient, CallStatus};
pub use config::ClientConfig;
pub use domain::cards::{Card, Color};
pub use domain::models::{BidInfo, GameInfo, GameScore, LobbyInfo, UserInfo};
pub use domain::sorting::{sort_cards, SortDirection};
pub use error::ClientError;
pub use realtime::{EventKind, EventStream, SseEvent};
pub use state::{AppContext, StateCell, SubscriptionToken};

// Prelude for consumer convenience
pub mod prelude {
    pub use super::client::*;
    pub use super::config::*;
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::realtime::*;
    pub use super::state::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
