//! Core card types shared with the game server's wire contract.

use serde::{Deserialize, Serialize};

/// Suit/color identifier as the server encodes it: a plain integer.
///
/// `0` is the colorless special suit (the rook card's suit, and also the
/// "no trump declared" value in game state).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub i32);

impl Color {
    pub const NONE: Color = Color(0);
    pub const RED: Color = Color(1);
    pub const YELLOW: Color = Color(2);
    pub const GREEN: Color = Color(3);
    pub const BLACK: Color = Color(4);

    pub fn as_i32(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub value: i32,
}

impl Card {
    /// The rook card, the only card of the colorless suit.
    pub const ROOK: Card = Card {
        color: Color::NONE,
        value: 0,
    };

    pub const fn new(color: Color, value: i32) -> Self {
        Self { color, value }
    }
}
