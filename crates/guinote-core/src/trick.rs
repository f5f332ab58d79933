//! Trick resolution.
//!
//! Pure helpers shared by the legality checker (who currently wins a partial
//! trick) and the reducer (who takes a completed one).

use crate::cards::{Card, Suit};
use crate::player::SeatIndex;
use serde::{Deserialize, Serialize};

/// A card played into the current trick, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickCard {
    pub seat: SeatIndex,
    pub card: Card,
}

/// Result of resolving a completed trick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickOutcome {
    pub winner_seat: SeatIndex,
    pub points: u32,
}

/// Position (index into the trick) of the card currently winning.
///
/// Works on partial tricks; returns `None` only for an empty trick. The
/// highest trump wins, otherwise the highest card of the suit led.
pub fn winning_position(trick: &[TrickCard], trump: Suit) -> Option<usize> {
    let first = trick.first()?;
    let lead = first.card.suit;

    let mut best = 0;
    for (i, tc) in trick.iter().enumerate().skip(1) {
        if tc.card.beats(&trick[best].card, trump, lead) {
            best = i;
        }
    }
    Some(best)
}

/// Seat currently winning a (possibly partial) trick
pub fn winning_seat(trick: &[TrickCard], trump: Suit) -> Option<SeatIndex> {
    winning_position(trick, trump).map(|i| trick[i].seat)
}

/// Resolve a completed four-card trick into its winner and point haul
pub fn resolve_trick(trick: &[TrickCard], trump: Suit) -> TrickOutcome {
    debug_assert_eq!(trick.len(), 4, "a completed trick has four cards");

    let winner = winning_position(trick, trump).unwrap_or(0);
    let points = trick.iter().map(|tc| tc.card.points()).sum();

    TrickOutcome {
        winner_seat: trick[winner].seat,
        points,
    }
}
