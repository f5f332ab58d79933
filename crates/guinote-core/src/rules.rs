//! Play legality.
//!
//! Two regimes apply. While the draw pile replenishes hands ("playing"
//! phase) any card may be thrown. Once the pile is exhausted ("arrastre")
//! strict trick discipline kicks in, checked in order against the cards
//! actually held:
//!
//! 1. If the player's partner is currently winning the partial trick, any
//!    card is legal - beating one's own partner ("montarse") included. This
//!    also covers the fourth-seat waiver: with the point already secured
//!    there is no forced trump.
//! 2. Holding the led suit forces following it, and forces beating the
//!    currently winning card when some held card of the suit can.
//! 3. Void in the led suit with the partner not winning forces a trump.
//! 4. Void in both, anything goes.
//!
//! "Currently winning" is always evaluated over the cards played so far,
//! never the eventual trick outcome.

use crate::cards::{Card, Suit};
use crate::game::GamePhase;
use crate::player::{partner_of, SeatIndex};
use crate::trick::{winning_position, TrickCard};

/// Whether `card` is a legal play for `seat` given the partial trick.
///
/// A card not in `hand` is never legal. The first card of a trick is always
/// free, in either phase.
pub fn is_valid_play(
    card: &Card,
    hand: &[Card],
    current_trick: &[TrickCard],
    trump: Suit,
    phase: GamePhase,
    seat: SeatIndex,
) -> bool {
    if !hand.contains(card) {
        return false;
    }

    // Leading, or still in the draw phase: no obligations.
    if current_trick.is_empty() || phase != GamePhase::Arrastre {
        return true;
    }

    let winning_idx = match winning_position(current_trick, trump) {
        Some(i) => i,
        None => return true,
    };

    // Partner on top: full freedom, montarse included.
    if current_trick[winning_idx].seat == partner_of(seat) {
        return true;
    }

    let lead = current_trick[0].card.suit;
    let winning_card = current_trick[winning_idx].card;

    let holds_lead_suit = hand.iter().any(|c| c.suit == lead);
    if holds_lead_suit {
        if card.suit != lead {
            return false;
        }
        let can_beat = hand
            .iter()
            .filter(|c| c.suit == lead)
            .any(|c| c.beats(&winning_card, trump, lead));
        if can_beat {
            return card.beats(&winning_card, trump, lead);
        }
        return true;
    }

    // Cannot follow: forced trump while holding one.
    if hand.iter().any(|c| c.suit == trump) {
        return card.suit == trump;
    }

    true
}

/// All legal plays from `hand`, preserving hand order.
///
/// Read-only; used for UI highlighting and bot move generation.
pub fn valid_cards(
    hand: &[Card],
    current_trick: &[TrickCard],
    trump: Suit,
    phase: GamePhase,
    seat: SeatIndex,
) -> Vec<Card> {
    hand.iter()
        .filter(|c| is_valid_play(c, hand, current_trick, trump, phase, seat))
        .copied()
        .collect()
}
