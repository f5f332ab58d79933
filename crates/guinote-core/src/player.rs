//! Players, teams and seat arithmetic.
//!
//! Guinote is always played by exactly four players in two fixed teams.
//! Partners sit opposite each other and play rotates counter-clockwise,
//! which with our seat numbering means the index decreases modulo 4.

use crate::bot::{BotDifficulty, BotPersonality};
use crate::cards::{Card, Suit};
use serde::{Deserialize, Serialize};

/// Seat index, 0..=3. Also used as the player id.
pub type SeatIndex = u8;

/// Team index, 0 or 1. Seats 0/2 form team 0, seats 1/3 form team 1.
pub type TeamIndex = u8;

/// Number of seats at the table
pub const SEAT_COUNT: usize = 4;

/// Number of teams
pub const TEAM_COUNT: usize = 2;

/// The seat that acts after `seat` (counter-clockwise rotation)
pub fn next_seat(seat: SeatIndex) -> SeatIndex {
    (seat + 3) % 4
}

/// The seat of `seat`'s partner (sitting opposite)
pub fn partner_of(seat: SeatIndex) -> SeatIndex {
    (seat + 2) % 4
}

/// The team a seat belongs to
pub fn team_of(seat: SeatIndex) -> TeamIndex {
    seat % 2
}

/// The opposing team
pub fn other_team(team: TeamIndex) -> TeamIndex {
    1 - team
}

/// A single player at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat index (0-3), doubles as the player id
    pub seat: SeatIndex,
    /// Display name
    pub name: String,
    /// Team this seat belongs to
    pub team: TeamIndex,
    /// Whether this seat is driven by a bot
    pub is_bot: bool,
    /// Bot temperament, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<BotPersonality>,
    /// Bot strength, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<BotDifficulty>,
}

impl Player {
    /// Create a human player
    pub fn human(seat: SeatIndex, name: String) -> Self {
        Self {
            seat,
            name,
            team: team_of(seat),
            is_bot: false,
            personality: None,
            difficulty: None,
        }
    }

    /// Create a bot player
    pub fn bot(
        seat: SeatIndex,
        name: String,
        difficulty: BotDifficulty,
        personality: BotPersonality,
    ) -> Self {
        Self {
            seat,
            name,
            team: team_of(seat),
            is_bot: true,
            personality: Some(personality),
            difficulty: Some(difficulty),
        }
    }
}

/// A declared cante (20 for a plain suit, 40 for the trump suit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cante {
    pub team: TeamIndex,
    pub suit: Suit,
    pub points: u32,
    /// The 40 is sung face-up; 20s are announced without showing the cards
    pub is_visible: bool,
}

/// One team's running state within a partida
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team index (0 or 1)
    pub team: TeamIndex,
    /// Cumulative score: carried-over points plus card points, cantes and
    /// the last-trick bonus once awarded
    pub score: u32,
    /// Card-only subtotal for this deal
    pub card_points: u32,
    /// Cantes declared this partida
    pub cantes: Vec<Cante>,
    /// Tricks taken this deal
    pub tricks_won: u32,
    /// Cards collected from won tricks this deal
    pub collected: Vec<Card>,
    /// Score carried into this deal (non-zero in vueltas)
    pub initial_score: u32,
}

impl Team {
    pub fn new(team: TeamIndex) -> Self {
        Self {
            team,
            score: 0,
            card_points: 0,
            cantes: Vec::new(),
            tricks_won: 0,
            collected: Vec::new(),
            initial_score: 0,
        }
    }

    /// Reset deal-local bookkeeping while carrying the score forward.
    /// Used when a vueltas round re-deals.
    pub fn carry_into_vueltas(&mut self) {
        self.initial_score = self.score;
        self.card_points = 0;
        self.cantes.clear();
        self.tricks_won = 0;
        self.collected.clear();
    }

    /// Whether this team has already sung the given suit
    pub fn has_sung(&self, suit: Suit) -> bool {
        self.cantes.iter().any(|c| c.suit == suit)
    }

    /// Credit a completed trick
    pub fn collect_trick(&mut self, cards: &[Card], points: u32) {
        self.collected.extend_from_slice(cards);
        self.card_points += points;
        self.score += points;
        self.tricks_won += 1;
    }
}
