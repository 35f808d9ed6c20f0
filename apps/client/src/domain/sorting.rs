//! Display ordering for a hand of cards.

use crate::domain::cards::{Card, Color};

/// Band that the colorless suit and the trump suit share, so that both sort
/// together regardless of the trump's own color value.
const TRUMP_BAND: i32 = 10;

/// Rank 1 outranks everything, so it sorts as 15.
const HIGH_RANK: i32 = 15;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Order a hand for display.
///
/// With `direction == None` the input comes back in its original order.
/// Otherwise cards are ordered by `sign * (effective_color * 100 +
/// effective_value)`: rank 1 counts as 15, and the colorless suit and the
/// current trump share one band. Ties keep their input order. The input slice
/// is never mutated; a fresh `Vec` is returned.
pub fn sort_cards(cards: &[Card], direction: Option<SortDirection>, trump: Color) -> Vec<Card> {
    let mut ordered = cards.to_vec();
    let Some(direction) = direction else {
        return ordered;
    };
    let sign = match direction {
        SortDirection::Ascending => 1,
        SortDirection::Descending => -1,
    };
    ordered.sort_by_key(|card| sign * sort_key(*card, trump));
    ordered
}

fn sort_key(card: Card, trump: Color) -> i32 {
    let value = if card.value == 1 {
        HIGH_RANK
    } else {
        card.value
    };
    let color = if card.color == Color::NONE || card.color == trump {
        TRUMP_BAND
    } else {
        card.color.as_i32()
    };
    color * 100 + value
}
