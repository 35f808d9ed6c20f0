//! Domain layer: wire models and the pure display-ordering helper.

pub mod cards;
pub mod models;
pub mod sorting;

#[cfg(test)]
mod tests_sorting;

// Re-exports for ergonomics
pub use cards::{Card, Color};
pub use models::{BidInfo, GameInfo, GameScore, LobbyInfo, UserInfo};
pub use sorting::{sort_cards, SortDirection};
