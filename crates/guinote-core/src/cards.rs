//! Card and deck model for the Spanish 40-card deck.
//!
//! This module contains:
//! - Suit and card value enums with their Guinote semantics
//! - Point values (As 11, Tres 10, Rey 4, Caballo 3, Sota 2)
//! - Trick strength ordering within a suit
//! - Deck construction and shuffling

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four Spanish suits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Oros,
    Copas,
    Espadas,
    Bastos,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Oros, Suit::Copas, Suit::Espadas, Suit::Bastos];

    /// Lowercase name, used in stable card ids
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Oros => "oros",
            Suit::Copas => "copas",
            Suit::Espadas => "espadas",
            Suit::Bastos => "bastos",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Card values of the Spanish deck (8 and 9 do not exist)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardValue {
    As,
    Dos,
    Tres,
    Cuatro,
    Cinco,
    Seis,
    Siete,
    Sota,
    Caballo,
    Rey,
}

impl CardValue {
    pub const ALL: [CardValue; 10] = [
        CardValue::As,
        CardValue::Dos,
        CardValue::Tres,
        CardValue::Cuatro,
        CardValue::Cinco,
        CardValue::Seis,
        CardValue::Siete,
        CardValue::Sota,
        CardValue::Caballo,
        CardValue::Rey,
    ];

    /// The printed number on the card (Sota 10, Caballo 11, Rey 12)
    pub fn number(&self) -> u8 {
        match self {
            CardValue::As => 1,
            CardValue::Dos => 2,
            CardValue::Tres => 3,
            CardValue::Cuatro => 4,
            CardValue::Cinco => 5,
            CardValue::Seis => 6,
            CardValue::Siete => 7,
            CardValue::Sota => 10,
            CardValue::Caballo => 11,
            CardValue::Rey => 12,
        }
    }

    /// Card points toward the 120-point deck total
    pub fn points(&self) -> u32 {
        match self {
            CardValue::As => 11,
            CardValue::Tres => 10,
            CardValue::Rey => 4,
            CardValue::Caballo => 3,
            CardValue::Sota => 2,
            _ => 0,
        }
    }

    /// Relative strength inside a suit when fighting for a trick.
    /// As > Tres > Rey > Caballo > Sota > Siete > ... > Dos.
    pub fn strength(&self) -> u8 {
        match self {
            CardValue::As => 9,
            CardValue::Tres => 8,
            CardValue::Rey => 7,
            CardValue::Caballo => 6,
            CardValue::Sota => 5,
            CardValue::Siete => 4,
            CardValue::Seis => 3,
            CardValue::Cinco => 2,
            CardValue::Cuatro => 1,
            CardValue::Dos => 0,
        }
    }
}

/// A single card of the Spanish deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub value: CardValue,
}

impl Card {
    pub fn new(suit: Suit, value: CardValue) -> Self {
        Self { suit, value }
    }

    /// Stable string id, e.g. `"espadas-7"`. Used as a map key at the
    /// serialization boundary.
    pub fn id(&self) -> String {
        format!("{}-{}", self.suit.name(), self.value.number())
    }

    /// Point value of this card
    pub fn points(&self) -> u32 {
        self.value.points()
    }

    /// Whether this card beats `other` in a trick, given the trump suit and
    /// the suit that was led. Off-suit non-trump cards never win.
    pub fn beats(&self, other: &Card, trump: Suit, _lead: Suit) -> bool {
        if self.suit == other.suit {
            return self.value.strength() > other.value.strength();
        }
        // Cross-suit, the incumbent always led or trumped: only a trump
        // takes it from here.
        self.suit == trump
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.suit.name(), self.value.number())
    }
}

/// The full 40-card deck in a fixed, unshuffled order
pub fn spanish_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(40);
    for suit in Suit::ALL {
        for value in CardValue::ALL {
            deck.push(Card::new(suit, value));
        }
    }
    deck
}

/// A freshly shuffled deck
pub fn shuffled_deck<R: Rng>(rng: &mut R) -> Vec<Card> {
    let mut deck = spanish_deck();
    deck.shuffle(rng);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_deck_has_40_unique_cards() {
        let deck = spanish_deck();
        assert_eq!(deck.len(), 40);

        let unique: HashSet<_> = deck.iter().collect();
        assert_eq!(unique.len(), 40);
    }

    #[test]
    fn test_deck_point_total_is_120() {
        let total: u32 = spanish_deck().iter().map(|c| c.points()).sum();
        assert_eq!(total, 120);
    }

    #[test]
    fn test_point_values() {
        assert_eq!(CardValue::As.points(), 11);
        assert_eq!(CardValue::Tres.points(), 10);
        assert_eq!(CardValue::Rey.points(), 4);
        assert_eq!(CardValue::Caballo.points(), 3);
        assert_eq!(CardValue::Sota.points(), 2);
        assert_eq!(CardValue::Siete.points(), 0);
        assert_eq!(CardValue::Dos.points(), 0);
    }

    #[test]
    fn test_strength_ordering() {
        // The tres outranks the rey despite its lower number
        assert!(CardValue::Tres.strength() > CardValue::Rey.strength());
        assert!(CardValue::As.strength() > CardValue::Tres.strength());
        assert!(CardValue::Sota.strength() > CardValue::Siete.strength());
    }

    #[test]
    fn test_beats_same_suit() {
        let tres = Card::new(Suit::Copas, CardValue::Tres);
        let rey = Card::new(Suit::Copas, CardValue::Rey);
        assert!(tres.beats(&rey, Suit::Oros, Suit::Copas));
        assert!(!rey.beats(&tres, Suit::Oros, Suit::Copas));
    }

    #[test]
    fn test_trump_beats_plain_suit() {
        let small_trump = Card::new(Suit::Oros, CardValue::Dos);
        let as_copas = Card::new(Suit::Copas, CardValue::As);
        assert!(small_trump.beats(&as_copas, Suit::Oros, Suit::Copas));
        assert!(!as_copas.beats(&small_trump, Suit::Oros, Suit::Copas));
    }

    #[test]
    fn test_discard_never_beats() {
        let discard = Card::new(Suit::Bastos, CardValue::As);
        let led = Card::new(Suit::Copas, CardValue::Dos);
        assert!(!discard.beats(&led, Suit::Oros, Suit::Copas));
    }

    #[test]
    fn test_card_id_format() {
        let card = Card::new(Suit::Espadas, CardValue::Sota);
        assert_eq!(card.id(), "espadas-10");
    }

    #[test]
    fn test_shuffled_deck_is_permutation() {
        let mut rng = rand::thread_rng();
        let deck = shuffled_deck(&mut rng);
        assert_eq!(deck.len(), 40);
        let unique: HashSet<_> = deck.iter().collect();
        assert_eq!(unique.len(), 40);
    }
}
