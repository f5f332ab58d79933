//! Player actions and the events they produce.
//!
//! `GameAction` is the discriminated union the reducer consumes; its serde
//! shape (`type` tag plus `data` payload) is the wire contract clients and
//! replay logs speak. `Action` wraps it with the acting player and an
//! optional client timestamp.

use crate::cards::{Card, Suit};
use crate::player::{SeatIndex, TeamIndex};
use serde::{Deserialize, Serialize};

/// All actions a player can submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GameAction {
    /// Throw a card into the current trick
    PlayCard { card: Card },
    /// Exchange the held trump seven for the face-up trump card
    #[serde(rename = "cambiar_7")]
    Cambiar7,
    /// Sing a king-and-knight pair (40 in trump, 20 elsewhere)
    DeclareCante { suit: Suit },
    /// Claim the partida with 101 or more points
    DeclareVictory,
    /// Denounce a misplay by the opposing team
    DeclareRenuncio { reason: RenuncioReason },
}

/// The action envelope as it crosses the boundary: who acted, what, when.
/// The timestamp is informational; the engine never reads clocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub player_id: SeatIndex,
    #[serde(flatten)]
    pub action: GameAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// The misplays a renuncio may denounce.
///
/// Detection is external to the engine (a table referee, a server-side
/// validator replaying the deal); the engine only publishes the valid
/// reasons and applies the forfeiture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenuncioReason {
    /// Did not follow the led suit while holding it (arrastre)
    FailedToFollowSuit,
    /// Followed suit but did not beat while able (arrastre)
    FailedToBeat,
    /// Did not trump while void and holding trump (arrastre)
    FailedToTrump,
    /// Sang a cante without holding the pair, or out of turn
    InvalidCante,
    /// Drew out of order or saw cards not their own
    IrregularDraw,
}

impl RenuncioReason {
    pub const ALL: [RenuncioReason; 5] = [
        RenuncioReason::FailedToFollowSuit,
        RenuncioReason::FailedToBeat,
        RenuncioReason::FailedToTrump,
        RenuncioReason::InvalidCante,
        RenuncioReason::IrregularDraw,
    ];
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card entered the current trick
    CardPlayed { seat: SeatIndex, card: Card },

    /// A four-card trick was resolved
    TrickCompleted {
        winner_seat: SeatIndex,
        winner_team: TeamIndex,
        points: u32,
        cards: Vec<Card>,
    },

    /// Each seat drew one card after a trick (draw phase only)
    CardsDrawn { first_seat: SeatIndex, remaining_deck: usize },

    /// The draw pile ran out; strict discipline from here on
    ArrastreStarted,

    /// The trump seven was exchanged for the face-up trump card
    SevenExchanged { seat: SeatIndex, received: Card },

    /// A cante was sung
    CanteDeclared {
        seat: SeatIndex,
        team: TeamIndex,
        suit: Suit,
        points: u32,
        is_visible: bool,
    },

    /// The +10 for taking the final trick
    LastTrickBonus { team: TeamIndex },

    /// A player claimed the win; `upheld` is false when the tally fell
    /// short and the claim backfired
    VictoryDeclared { seat: SeatIndex, team: TeamIndex, upheld: bool },

    /// A renuncio was denounced against `against` team
    RenuncioDeclared {
        seat: SeatIndex,
        against: TeamIndex,
        reason: RenuncioReason,
    },

    /// Neither team reached the threshold; a vueltas deal begins
    VueltasStarted { carried_scores: [u32; 2] },

    /// The partida was decided
    PartidaFinished { winner: TeamIndex, scores: [u32; 2] },

    /// Match bookkeeping after a finished partida
    CotoWon { team: TeamIndex },

    /// The whole match (coton) is over
    MatchWon { team: TeamIndex },
}
