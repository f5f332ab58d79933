//! Boundary serialization.
//!
//! The engine keeps seat- and team-indexed data in fixed arrays; at the
//! persistence/transport boundary those become plain key-ordered objects
//! keyed by stable string ids, so that `serialize -> deserialize ->
//! serialize` is byte-for-byte idempotent regardless of the producer.
//! The event history never crosses the boundary: it reconstructs empty.

use crate::cards::{Card, Suit};
use crate::game::{GamePhase, GameState};
use crate::match_score::MatchScore;
use crate::player::{Player, SeatIndex, Team, SEAT_COUNT, TEAM_COUNT};
use crate::trick::TrickCard;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a snapshot could not be restored
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Missing seat entry '{0}'")]
    MissingSeat(String),

    #[error("Missing team entry '{0}'")]
    MissingTeam(String),
}

/// The boundary form of a [`GameState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Players keyed by seat id ("0".."3")
    pub players: BTreeMap<String, Player>,
    /// Teams keyed by team id ("0", "1")
    pub teams: BTreeMap<String, Team>,
    pub deck: Vec<Card>,
    /// Hands keyed by seat id
    pub hands: BTreeMap<String, Vec<Card>>,
    pub trump_suit: Suit,
    pub trump_card: Card,
    pub current_trick: Vec<TrickCard>,
    pub current_player: SeatIndex,
    pub dealer: SeatIndex,
    pub trick_count: u32,
    pub can_cambiar7: bool,
    pub is_vueltas: bool,
    pub can_declare_victory: bool,
    pub phase: GamePhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_trick_winner: Option<SeatIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_trick: Option<Vec<TrickCard>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<MatchScore>,
    pub deal_number: u32,
    pub rng_seed: u64,
}

impl GameSnapshot {
    /// Capture a state into its boundary form. History is dropped.
    pub fn capture(state: &GameState) -> Self {
        let mut players = BTreeMap::new();
        let mut hands = BTreeMap::new();
        for seat in 0..SEAT_COUNT {
            players.insert(seat.to_string(), state.players[seat].clone());
            hands.insert(seat.to_string(), state.hands[seat].clone());
        }

        let mut teams = BTreeMap::new();
        for team in 0..TEAM_COUNT {
            teams.insert(team.to_string(), state.teams[team].clone());
        }

        Self {
            players,
            teams,
            deck: state.deck.clone(),
            hands,
            trump_suit: state.trump_suit,
            trump_card: state.trump_card,
            current_trick: state.current_trick.clone(),
            current_player: state.current_player,
            dealer: state.dealer,
            trick_count: state.trick_count,
            can_cambiar7: state.can_cambiar7,
            is_vueltas: state.is_vueltas,
            can_declare_victory: state.can_declare_victory,
            phase: state.phase,
            last_trick_winner: state.last_trick_winner,
            last_trick: state.last_trick.clone(),
            match_score: state.match_score.clone(),
            deal_number: state.deal_number,
            rng_seed: state.rng_seed,
        }
    }

    /// Rebuild the engine state. The history starts empty.
    pub fn restore(&self) -> Result<GameState, SnapshotError> {
        let seat = |i: usize| -> Result<(Player, Vec<Card>), SnapshotError> {
            let key = i.to_string();
            let player = self
                .players
                .get(&key)
                .cloned()
                .ok_or_else(|| SnapshotError::MissingSeat(key.clone()))?;
            let hand = self
                .hands
                .get(&key)
                .cloned()
                .ok_or(SnapshotError::MissingSeat(key))?;
            Ok((player, hand))
        };
        let team = |i: usize| -> Result<Team, SnapshotError> {
            let key = i.to_string();
            self.teams
                .get(&key)
                .cloned()
                .ok_or(SnapshotError::MissingTeam(key))
        };

        let (p0, h0) = seat(0)?;
        let (p1, h1) = seat(1)?;
        let (p2, h2) = seat(2)?;
        let (p3, h3) = seat(3)?;

        Ok(GameState {
            players: [p0, p1, p2, p3],
            teams: [team(0)?, team(1)?],
            deck: self.deck.clone(),
            hands: [h0, h1, h2, h3],
            trump_suit: self.trump_suit,
            trump_card: self.trump_card,
            current_trick: self.current_trick.clone(),
            current_player: self.current_player,
            dealer: self.dealer,
            trick_count: self.trick_count,
            can_cambiar7: self.can_cambiar7,
            is_vueltas: self.is_vueltas,
            can_declare_victory: self.can_declare_victory,
            phase: self.phase,
            last_trick_winner: self.last_trick_winner,
            last_trick: self.last_trick.clone(),
            match_score: self.match_score.clone(),
            deal_number: self.deal_number,
            rng_seed: self.rng_seed,
            history: Vec::new(),
        })
    }
}

/// Serialize a state to its boundary JSON
pub fn to_json(state: &GameState) -> serde_json::Result<String> {
    serde_json::to_string(&GameSnapshot::capture(state))
}

/// Restore a state from boundary JSON
pub fn from_json(json: &str) -> Result<GameState, Box<dyn std::error::Error>> {
    let snapshot: GameSnapshot = serde_json::from_str(json)?;
    Ok(snapshot.restore()?)
}
