//! Property tests for the display-ordering utility (pure domain, no network).
//!
//! Properties tested:
//! - `None` direction is the identity and never mutates the input
//! - Ascending then reversed equals descending for a fixed trump
//! - Equal composite keys keep their input order (stability)
//! - Rank 1 always sorts as rank 15, whatever its color
//! - Colorless and trump cards land in one shared band

use proptest::prelude::*;

use crate::domain::cards::{Card, Color};
use crate::domain::sorting::{sort_cards, SortDirection};

fn card() -> impl Strategy<Value = Card> {
    (0..5i32, 0..15i32).prop_map(|(color, value)| Card::new(Color(color), value))
}

fn hand() -> impl Strategy<Value = Vec<Card>> {
    proptest::collection::vec(card(), 0..12)
}

fn trump() -> impl Strategy<Value = Color> {
    (0..5i32).prop_map(Color)
}

proptest! {
    #[test]
    fn prop_no_direction_is_identity(cards in hand(), trump in trump()) {
        let before = cards.clone();
        let ordered = sort_cards(&cards, None, trump);
        prop_assert_eq!(&ordered, &before);
        prop_assert_eq!(&cards, &before);
    }

    #[test]
    fn prop_descending_is_reversed_ascending(cards in hand(), trump in trump()) {
        let mut ascending = sort_cards(&cards, Some(SortDirection::Ascending), trump);
        ascending.reverse();
        let descending = sort_cards(&cards, Some(SortDirection::Descending), trump);
        prop_assert_eq!(ascending, descending);
    }

    /// Duplicating a card yields equal keys; the duplicates must stay adjacent
    /// and in input order for both directions.
    #[test]
    fn prop_equal_keys_keep_input_order(cards in hand(), seed in card(), trump in trump()) {
        let mut with_dupes = vec![seed];
        with_dupes.extend(cards);
        with_dupes.push(seed);

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let ordered = sort_cards(&with_dupes, Some(direction), trump);
            let positions: Vec<usize> = ordered
                .iter()
                .enumerate()
                .filter_map(|(i, c)| (*c == seed).then_some(i))
                .collect();
            prop_assert!(positions.len() >= 2);
            prop_assert!(positions.windows(2).all(|w| w[1] == w[0] + 1));
        }
    }

    /// A rank-1 card sorts exactly where the same card with rank 15 would.
    #[test]
    fn prop_rank_one_normalizes_to_fifteen(cards in hand(), color in 0..5i32, trump in trump()) {
        // Keep the probe cards unique within the hand.
        let cards: Vec<Card> = cards
            .into_iter()
            .filter(|c| c.value != 1 && c.value != 15)
            .collect();
        let mut with_ace = cards.clone();
        with_ace.push(Card::new(Color(color), 1));
        let mut with_fifteen = cards;
        with_fifteen.push(Card::new(Color(color), 15));

        let ordered_ace = sort_cards(&with_ace, Some(SortDirection::Ascending), trump);
        let ordered_fifteen = sort_cards(&with_fifteen, Some(SortDirection::Ascending), trump);

        let ace_at = ordered_ace
            .iter()
            .position(|c| *c == Card::new(Color(color), 1))
            .unwrap();
        let fifteen_at = ordered_fifteen
            .iter()
            .position(|c| *c == Card::new(Color(color), 15))
            .unwrap();
        prop_assert_eq!(ace_at, fifteen_at);
    }

    /// With trump T != 0, a colorless card and a trump card of the same value
    /// sort adjacently (same band, same effective value).
    #[test]
    fn prop_trump_banding(value in 2..15i32, trump in 1..5i32) {
        let trump = Color(trump);
        let cards = vec![Card::new(trump, value), Card::new(Color::NONE, value)];
        let ordered = sort_cards(&cards, Some(SortDirection::Ascending), trump);
        // Equal keys: input order preserved.
        prop_assert_eq!(ordered, cards);
    }
}

/// Worked example pinned from the ordering contract: keys 105, 115, 215.
#[test]
fn worked_example_matches_key_formula() {
    let cards = vec![
        Card::new(Color::RED, 5),
        Card::new(Color::YELLOW, 1),
        Card::new(Color::RED, 1),
    ];
    let ordered = sort_cards(&cards, Some(SortDirection::Ascending), Color::NONE);
    assert_eq!(
        ordered,
        vec![
            Card::new(Color::RED, 5),
            Card::new(Color::RED, 1),
            Card::new(Color::YELLOW, 1),
        ]
    );
}
