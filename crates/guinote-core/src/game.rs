//! Core game state machine.
//!
//! This module contains the `GameState` struct, the phase machine and the
//! reducer that consumes player actions. The reducer is pure: it takes an
//! immutable state plus one action and returns either a new state with the
//! events it produced, or a typed rejection that leaves the prior state
//! untouched. Dealing is driven by a seed stored in the state, so the same
//! `(state, action)` pair always yields the same result.

use crate::actions::{Action, GameAction, GameEvent};
use crate::cards::{shuffled_deck, Card, CardValue, Suit};
use crate::match_score::{MatchFormat, MatchOutcome, MatchScore};
use crate::player::{
    next_seat, other_team, team_of, Cante, Player, SeatIndex, Team, TeamIndex,
    SEAT_COUNT, TEAM_COUNT,
};
use crate::rules;
use crate::trick::{resolve_trick, TrickCard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Score a team must reach to take the partida
pub const WINNING_SCORE: u32 = 101;

/// Cards dealt to each seat
pub const CARDS_PER_HAND: usize = 6;

/// Bonus for taking the final trick ("las diez de ultimas")
pub const LAST_TRICK_BONUS: u32 = 10;

/// Cante in the trump suit ("las cuarenta")
pub const CANTE_TRUMP: u32 = 40;

/// Cante in a plain suit ("las veinte")
pub const CANTE_PLAIN: u32 = 20;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Cards are being dealt (transient; a fresh state leaves it immediately)
    Dealing,
    /// Draw phase: free play, hands replenish after each trick
    Playing,
    /// Draw pile exhausted: strict trick discipline
    Arrastre,
    /// Totals being settled (resolved within the same reducer call)
    Scoring,
    /// The partida is decided
    GameOver { winner: TeamIndex },
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameError {
    #[error("Not your turn")]
    NotPlayersTurn,

    #[error("Card not in hand")]
    CardNotInHand,

    #[error("Illegal play for the current trick")]
    IllegalMove,

    #[error("Declaration preconditions not met")]
    IneligibleDeclaration,

    #[error("Action not permitted in current phase")]
    InvalidPhaseForAction,
}

/// The complete game state for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// The four seats, in rotation order
    pub players: [Player; SEAT_COUNT],
    /// The two teams (seat % 2)
    pub teams: [Team; TEAM_COUNT],
    /// Draw pile, top at the end. While non-empty, index 0 is the face-up
    /// trump card, drawn last.
    pub deck: Vec<Card>,
    /// Hands by seat
    pub hands: [Vec<Card>; SEAT_COUNT],
    /// Trump suit for this deal
    pub trump_suit: Suit,
    /// The face-up card that set the trump (swapped by cambiar7)
    pub trump_card: Card,
    /// Cards played into the trick in progress
    pub current_trick: Vec<TrickCard>,
    /// Seat to act next
    pub current_player: SeatIndex,
    /// Seat that dealt this hand
    pub dealer: SeatIndex,
    /// Completed tricks this deal
    pub trick_count: u32,
    /// Whether the trump seven may still be exchanged
    pub can_cambiar7: bool,
    /// Whether this deal is a vueltas replay
    pub is_vueltas: bool,
    /// Some team has reached the winning score
    pub can_declare_victory: bool,
    /// Current phase
    pub phase: GamePhase,
    /// Winner of the most recent trick
    pub last_trick_winner: Option<SeatIndex>,
    /// The most recent completed trick
    pub last_trick: Option<Vec<TrickCard>>,
    /// Standing across partidas, when playing a full match
    pub match_score: Option<MatchScore>,
    /// How many hands have been dealt (seeds each deal)
    pub deal_number: u32,
    /// Seed all dealing derives from (deterministic replays)
    pub(crate) rng_seed: u64,
    /// Events since creation. Not persisted; rebuilt empty on load.
    #[serde(skip)]
    pub history: Vec<GameEvent>,
}

impl GameState {
    /// Create and deal a game with a seed drawn from thread entropy
    pub fn new(players: [Player; SEAT_COUNT]) -> Self {
        let seed = rand::thread_rng().gen();
        Self::with_seed(players, seed)
    }

    /// Create and deal a single-partida game from an explicit seed
    pub fn with_seed(players: [Player; SEAT_COUNT], seed: u64) -> Self {
        Self::build(players, seed, None)
    }

    /// Create and deal the first partida of a full match
    pub fn with_match(players: [Player; SEAT_COUNT], seed: u64, format: MatchFormat) -> Self {
        Self::build(players, seed, Some(MatchScore::new(format)))
    }

    /// A table of four named humans, mostly for tests and local play
    pub fn new_table(names: [&str; SEAT_COUNT], seed: u64) -> Self {
        let players = [
            Player::human(0, names[0].to_string()),
            Player::human(1, names[1].to_string()),
            Player::human(2, names[2].to_string()),
            Player::human(3, names[3].to_string()),
        ];
        Self::with_seed(players, seed)
    }

    fn build(
        players: [Player; SEAT_COUNT],
        seed: u64,
        match_score: Option<MatchScore>,
    ) -> Self {
        let mut state = Self {
            players,
            teams: [Team::new(0), Team::new(1)],
            deck: Vec::new(),
            hands: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
            trump_suit: Suit::Oros,
            trump_card: Card::new(Suit::Oros, CardValue::As),
            current_trick: Vec::new(),
            current_player: 0,
            dealer: 0,
            trick_count: 0,
            can_cambiar7: true,
            is_vueltas: false,
            can_declare_victory: false,
            phase: GamePhase::Dealing,
            last_trick_winner: None,
            last_trick: None,
            match_score,
            deal_number: 0,
            rng_seed: seed,
            history: Vec::new(),
        };
        state.deal_hand();
        state
    }

    /// Shuffle and deal a fresh hand, entering the draw phase.
    /// Mano (first to act) sits to the dealer's right.
    fn deal_hand(&mut self) {
        self.phase = GamePhase::Dealing;

        let mut rng = StdRng::seed_from_u64(self.rng_seed.wrapping_add(self.deal_number as u64));
        let mut deck = shuffled_deck(&mut rng);

        let mano = next_seat(self.dealer);
        for hand in &mut self.hands {
            hand.clear();
        }
        // Two rounds of three cards, starting with mano
        for _ in 0..2 {
            let mut seat = mano;
            for _ in 0..SEAT_COUNT {
                for _ in 0..CARDS_PER_HAND / 2 {
                    if let Some(card) = deck.pop() {
                        self.hands[seat as usize].push(card);
                    }
                }
                seat = next_seat(seat);
            }
        }

        // The bottom card of the remaining pile is turned as trump and
        // drawn last.
        self.trump_card = deck[0];
        self.trump_suit = deck[0].suit;
        self.deck = deck;

        self.current_trick.clear();
        self.current_player = mano;
        self.trick_count = 0;
        self.can_cambiar7 = true;
        self.last_trick_winner = None;
        self.last_trick = None;
        self.refresh_victory_flag();
        self.deal_number += 1;
        self.phase = GamePhase::Playing;
    }

    // ==================== Queries ====================

    /// The player seated at `seat`
    pub fn player(&self, seat: SeatIndex) -> &Player {
        &self.players[seat as usize]
    }

    /// A seat's hand
    pub fn hand(&self, seat: SeatIndex) -> &[Card] {
        &self.hands[seat as usize]
    }

    /// Whether `card` would be accepted from `seat` right now
    pub fn is_valid_play(&self, seat: SeatIndex, card: &Card) -> bool {
        rules::is_valid_play(
            card,
            self.hand(seat),
            &self.current_trick,
            self.trump_suit,
            self.phase,
            seat,
        )
    }

    /// Legal plays from a seat's hand (read-only, for UI and bots)
    pub fn valid_cards(&self, seat: SeatIndex) -> Vec<Card> {
        rules::valid_cards(
            self.hand(seat),
            &self.current_trick,
            self.trump_suit,
            self.phase,
            seat,
        )
    }

    /// Whether the game has been decided
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// The winning team, once decided
    pub fn winner(&self) -> Option<TeamIndex> {
        if let GamePhase::GameOver { winner } = self.phase {
            Some(winner)
        } else {
            None
        }
    }

    /// Cards currently tracked anywhere in the deal. Always 40.
    pub fn total_cards_in_play(&self) -> usize {
        self.deck.len()
            + self.hands.iter().map(Vec::len).sum::<usize>()
            + self.teams.iter().map(|t| t.collected.len()).sum::<usize>()
            + self.current_trick.len()
    }

    /// Whether `seat` may exchange the trump seven right now.
    /// Eligibility is turn-based, not tied to having won the last trick.
    pub fn can_exchange_seven(&self, seat: SeatIndex) -> bool {
        self.phase == GamePhase::Playing
            && self.can_cambiar7
            && self.current_player == seat
            && !self.deck.is_empty()
            && self
                .hand(seat)
                .contains(&Card::new(self.trump_suit, CardValue::Siete))
    }

    /// Whether `seat` may sing `suit` right now
    pub fn can_sing(&self, seat: SeatIndex, suit: Suit) -> bool {
        if self.phase != GamePhase::Playing || !self.current_trick.is_empty() {
            return false;
        }
        if !self.team_won_last_trick(seat) {
            return false;
        }
        let team = &self.teams[team_of(seat) as usize];
        if team.has_sung(suit) {
            return false;
        }
        let hand = self.hand(seat);
        hand.contains(&Card::new(suit, CardValue::Rey))
            && hand.contains(&Card::new(suit, CardValue::Caballo))
    }

    /// Whether `seat` is at a moment where a victory call is heard
    pub fn can_call_victory(&self, seat: SeatIndex) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Arrastre)
            && self.can_declare_victory
            && self.current_trick.is_empty()
            && self.team_won_last_trick(seat)
    }

    fn team_won_last_trick(&self, seat: SeatIndex) -> bool {
        match self.last_trick_winner {
            Some(winner) => team_of(winner) == team_of(seat),
            None => false,
        }
    }

    /// All actions the engine would currently accept from `seat`.
    /// Renuncio is omitted: denouncing a misplay needs outside knowledge.
    pub fn valid_actions(&self, seat: SeatIndex) -> Vec<GameAction> {
        let mut actions = Vec::new();

        if !matches!(self.phase, GamePhase::Playing | GamePhase::Arrastre) {
            return actions;
        }

        for suit in Suit::ALL {
            if self.can_sing(seat, suit) {
                actions.push(GameAction::DeclareCante { suit });
            }
        }

        if self.can_call_victory(seat) {
            actions.push(GameAction::DeclareVictory);
        }

        if self.can_exchange_seven(seat) {
            actions.push(GameAction::Cambiar7);
        }

        if self.current_player == seat {
            for card in self.valid_cards(seat) {
                actions.push(GameAction::PlayCard { card });
            }
        }

        actions
    }

    // ==================== Reducer ====================

    /// Apply one action, returning the successor state and the events it
    /// produced. On rejection the prior state is untouched.
    pub fn apply_action(
        &self,
        seat: SeatIndex,
        action: &GameAction,
    ) -> Result<(GameState, Vec<GameEvent>), GameError> {
        let mut next = self.clone();
        let mut events = Vec::new();
        next.apply_mut(seat, action, &mut events)?;
        next.history.extend(events.iter().cloned());
        Ok((next, events))
    }

    /// Apply a boundary-envelope action
    pub fn apply(&self, action: &Action) -> Result<(GameState, Vec<GameEvent>), GameError> {
        self.apply_action(action.player_id, &action.action)
    }

    fn apply_mut(
        &mut self,
        seat: SeatIndex,
        action: &GameAction,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        if matches!(self.phase, GamePhase::GameOver { .. } | GamePhase::Dealing) {
            return Err(GameError::InvalidPhaseForAction);
        }

        match action {
            GameAction::PlayCard { card } => self.play_card(seat, card, events),
            GameAction::Cambiar7 => self.cambiar_7(seat, events),
            GameAction::DeclareCante { suit } => self.declare_cante(seat, *suit, events),
            GameAction::DeclareVictory => self.declare_victory(seat, events),
            GameAction::DeclareRenuncio { reason } => {
                let against = other_team(team_of(seat));
                events.push(GameEvent::RenuncioDeclared {
                    seat,
                    against,
                    reason: *reason,
                });
                self.finish_partida(team_of(seat), events);
                Ok(())
            }
        }
    }

    // ==================== play_card ====================

    fn play_card(
        &mut self,
        seat: SeatIndex,
        card: &Card,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::Arrastre) {
            return Err(GameError::InvalidPhaseForAction);
        }
        if self.current_player != seat {
            return Err(GameError::NotPlayersTurn);
        }
        let hand = &self.hands[seat as usize];
        let pos = match hand.iter().position(|c| c == card) {
            Some(p) => p,
            None => return Err(GameError::CardNotInHand),
        };
        if !self.is_valid_play(seat, card) {
            return Err(GameError::IllegalMove);
        }

        let card = self.hands[seat as usize].remove(pos);
        self.current_trick.push(TrickCard { seat, card });
        events.push(GameEvent::CardPlayed { seat, card });

        if self.current_trick.len() < SEAT_COUNT {
            self.current_player = next_seat(seat);
            return Ok(());
        }

        self.complete_trick(events);
        Ok(())
    }

    fn complete_trick(&mut self, events: &mut Vec<GameEvent>) {
        let outcome = resolve_trick(&self.current_trick, self.trump_suit);
        let winner_seat = outcome.winner_seat;
        let winner_team = team_of(winner_seat);

        let trick = std::mem::take(&mut self.current_trick);
        let cards: Vec<Card> = trick.iter().map(|tc| tc.card).collect();
        self.teams[winner_team as usize].collect_trick(&cards, outcome.points);

        self.trick_count += 1;
        self.last_trick_winner = Some(winner_seat);
        self.last_trick = Some(trick);
        self.current_player = winner_seat;
        self.refresh_victory_flag();

        events.push(GameEvent::TrickCompleted {
            winner_seat,
            winner_team,
            points: outcome.points,
            cards,
        });

        match self.phase {
            GamePhase::Playing => {
                if !self.deck.is_empty() {
                    self.draw_round(winner_seat, events);
                }
            }
            GamePhase::Arrastre => {
                if self.hands.iter().all(Vec::is_empty) {
                    self.teams[winner_team as usize].score += LAST_TRICK_BONUS;
                    events.push(GameEvent::LastTrickBonus { team: winner_team });
                    self.phase = GamePhase::Scoring;
                    self.resolve_scoring(events);
                }
            }
            _ => {}
        }
    }

    /// One card to each seat, winner first, then on around the table.
    /// Emptying the pile flips the game into arrastre in the same call.
    fn draw_round(&mut self, winner_seat: SeatIndex, events: &mut Vec<GameEvent>) {
        let mut seat = winner_seat;
        for _ in 0..SEAT_COUNT {
            if let Some(card) = self.deck.pop() {
                self.hands[seat as usize].push(card);
            }
            seat = next_seat(seat);
        }

        events.push(GameEvent::CardsDrawn {
            first_seat: winner_seat,
            remaining_deck: self.deck.len(),
        });

        if self.deck.is_empty() {
            self.phase = GamePhase::Arrastre;
            self.can_cambiar7 = false;
            events.push(GameEvent::ArrastreStarted);
        }
    }

    // ==================== cambiar_7 ====================

    fn cambiar_7(&mut self, seat: SeatIndex, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::InvalidPhaseForAction);
        }
        if self.current_player != seat {
            return Err(GameError::NotPlayersTurn);
        }
        if !self.can_cambiar7 || self.deck.is_empty() {
            return Err(GameError::IneligibleDeclaration);
        }

        let seven = Card::new(self.trump_suit, CardValue::Siete);
        let pos = match self.hands[seat as usize].iter().position(|c| *c == seven) {
            Some(p) => p,
            None => return Err(GameError::IneligibleDeclaration),
        };

        let face_up = self.deck[0];
        self.hands[seat as usize][pos] = face_up;
        self.deck[0] = seven;
        self.trump_card = seven;
        self.can_cambiar7 = false;

        events.push(GameEvent::SevenExchanged {
            seat,
            received: face_up,
        });
        Ok(())
    }

    // ==================== declare_cante ====================

    fn declare_cante(
        &mut self,
        seat: SeatIndex,
        suit: Suit,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::InvalidPhaseForAction);
        }
        if !self.can_sing(seat, suit) {
            return Err(GameError::IneligibleDeclaration);
        }

        let team = team_of(seat);
        let is_trump = suit == self.trump_suit;
        let points = if is_trump { CANTE_TRUMP } else { CANTE_PLAIN };
        let cante = Cante {
            team,
            suit,
            points,
            is_visible: is_trump,
        };

        let t = &mut self.teams[team as usize];
        t.cantes.push(cante);
        t.score += points;
        self.refresh_victory_flag();

        events.push(GameEvent::CanteDeclared {
            seat,
            team,
            suit,
            points,
            is_visible: is_trump,
        });
        Ok(())
    }

    // ==================== declare_victory ====================

    /// A claim of having the partida. A truthful claim wins on the spot;
    /// a short one hands the partida to the opponents.
    fn declare_victory(
        &mut self,
        seat: SeatIndex,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::Arrastre) {
            return Err(GameError::InvalidPhaseForAction);
        }
        if !self.can_call_victory(seat) {
            return Err(GameError::IneligibleDeclaration);
        }

        let team = team_of(seat);
        let upheld = self.teams[team as usize].score >= WINNING_SCORE;
        events.push(GameEvent::VictoryDeclared { seat, team, upheld });

        let winner = if upheld { team } else { other_team(team) };
        self.phase = GamePhase::Scoring;
        self.finish_partida(winner, events);
        Ok(())
    }

    // ==================== scoring & vueltas ====================

    fn refresh_victory_flag(&mut self) {
        self.can_declare_victory = self.teams.iter().any(|t| t.score >= WINNING_SCORE);
    }

    /// Settle a played-out deal: either somebody reached the threshold, or
    /// the whole thing is replayed as vueltas with the scores carried.
    fn resolve_scoring(&mut self, events: &mut Vec<GameEvent>) {
        let scores = [self.teams[0].score, self.teams[1].score];

        if scores.iter().all(|&s| s < WINNING_SCORE) {
            self.start_vueltas(events);
            return;
        }

        let winner = if scores[0] > scores[1] {
            0
        } else if scores[1] > scores[0] {
            1
        } else {
            // Dead tie: the last trick decides
            self.last_trick_winner.map(team_of).unwrap_or(0)
        };
        self.finish_partida(winner, events);
    }

    fn start_vueltas(&mut self, events: &mut Vec<GameEvent>) {
        for team in &mut self.teams {
            team.carry_into_vueltas();
        }
        events.push(GameEvent::VueltasStarted {
            carried_scores: [self.teams[0].initial_score, self.teams[1].initial_score],
        });

        self.is_vueltas = true;
        self.dealer = next_seat(self.dealer);
        self.deal_hand();
    }

    /// Start the next partida of a running match. Team tallies reset,
    /// the deal passes on, and match standing carries over.
    pub fn next_partida(&self) -> Result<GameState, GameError> {
        if !self.is_finished() {
            return Err(GameError::InvalidPhaseForAction);
        }
        if self.match_score.as_ref().map_or(true, |ms| ms.is_finished()) {
            return Err(GameError::InvalidPhaseForAction);
        }

        let mut next = self.clone();
        next.teams = [Team::new(0), Team::new(1)];
        next.is_vueltas = false;
        next.dealer = next_seat(next.dealer);
        next.deal_hand();
        Ok(next)
    }

    fn finish_partida(&mut self, winner: TeamIndex, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::GameOver { winner };
        events.push(GameEvent::PartidaFinished {
            winner,
            scores: [self.teams[0].score, self.teams[1].score],
        });

        if let Some(ms) = &mut self.match_score {
            match ms.record_partida(winner) {
                MatchOutcome::PartidaWon => {}
                MatchOutcome::CotoWon => events.push(GameEvent::CotoWon { team: winner }),
                MatchOutcome::MatchWon => {
                    events.push(GameEvent::CotoWon { team: winner });
                    events.push(GameEvent::MatchWon { team: winner });
                }
            }
        }
    }
}
