//! Client test support utilities
//!
//! This crate provides utilities for testing the game client, including an
//! in-memory mock game server and unified logging initialization.

pub mod mock_server;
pub mod test_logging;
