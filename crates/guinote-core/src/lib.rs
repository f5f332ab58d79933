//! Guinote - a rules engine for the Spanish trick-taking game
//!
//! This crate provides the complete game logic for Guinote, including:
//! - The 40-card Spanish deck with Guinote point values and trick order
//! - Trick resolution with trump and follow/beat obligations (arrastre)
//! - Declarations: cantes, the trump-seven exchange, victory calls, renuncio
//! - Scoring, vueltas replays, and coto/coton match bookkeeping
//!
//! # Architecture
//!
//! The engine is deterministic and side-effect free. Shuffles come from a
//! seed carried in the state, and every action application is a pure
//! function from a state and an action to a successor state plus the
//! events that explain it. It can be compiled to:
//! - Native Rust for server-side game hosting
//! - WebAssembly for client-side single-player or local multiplayer
//!
//! # Modules
//!
//! - [`cards`]: Suits, values, point schedule, and the deck
//! - [`trick`]: A trick in progress and its resolution
//! - [`rules`]: Legality of a card play in both phases
//! - [`player`]: Seats, teams, and per-team tallies
//! - [`actions`]: The action and event vocabulary
//! - [`game`]: The state machine and reducer
//! - [`match_score`]: Partida, coto, and coton aggregation
//! - [`snapshot`]: Stable serialization boundary
//! - [`bot`]: AI opponents

pub mod actions;
pub mod bot;
pub mod cards;
pub mod game;
pub mod match_score;
pub mod player;
pub mod rules;
pub mod snapshot;
pub mod trick;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{Action, GameAction, GameEvent, RenuncioReason};
pub use bot::{Bot, BotDifficulty, BotPersonality};
pub use cards::{spanish_deck, Card, CardValue, Suit};
pub use game::{GameError, GamePhase, GameState, WINNING_SCORE};
pub use match_score::{MatchFormat, MatchOutcome, MatchScore, SetLabel};
pub use player::{next_seat, partner_of, team_of, Cante, Player, SeatIndex, Team, TeamIndex};
pub use snapshot::{GameSnapshot, SnapshotError};
pub use trick::{TrickCard, TrickOutcome};
