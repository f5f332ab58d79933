//! AI players.
//!
//! Bots are pure consumers of the query interface: they look at a state,
//! pick one of the actions the engine would accept, and hand it back to
//! whoever schedules them. Three strengths:
//! - Easy: random legal action
//! - Medium: fixed priorities (sing, exchange, simple card sense)
//! - Hard: scores every candidate card against the live trick

use crate::actions::GameAction;
use crate::cards::Card;
use crate::game::{GamePhase, GameState};
use crate::player::{partner_of, SeatIndex};
use crate::trick::winning_seat;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
    Hard,
}

/// Bot temperament, a small bias on the hard evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotPersonality {
    /// Hoards trumps and high cards
    Cautious,
    /// No bias
    Balanced,
    /// Spends trumps early to hunt points
    Aggressive,
}

/// A bot player that can decide on actions
pub struct Bot {
    pub seat: SeatIndex,
    pub difficulty: BotDifficulty,
    pub personality: BotPersonality,
    rng: StdRng,
}

impl Bot {
    pub fn new(seat: SeatIndex, difficulty: BotDifficulty) -> Self {
        Self {
            seat,
            difficulty,
            personality: BotPersonality::Balanced,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic bot for simulations and tests
    pub fn with_seed(seat: SeatIndex, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            seat,
            difficulty,
            personality: BotPersonality::Balanced,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_personality(mut self, personality: BotPersonality) -> Self {
        self.personality = personality;
        self
    }

    /// Choose an action from the engine's valid actions
    pub fn choose_action(&mut self, game: &GameState) -> Option<GameAction> {
        let valid_actions = game.valid_actions(self.seat);
        if valid_actions.is_empty() {
            return None;
        }

        match self.difficulty {
            BotDifficulty::Easy => valid_actions.choose(&mut self.rng).cloned(),
            BotDifficulty::Medium => self.choose_medium(game, &valid_actions),
            BotDifficulty::Hard => self.choose_hard(game, &valid_actions),
        }
    }

    /// Medium: declarations first, then simple card sense
    fn choose_medium(&mut self, game: &GameState, actions: &[GameAction]) -> Option<GameAction> {
        // A truthful victory call ends it on the spot
        if actions.contains(&GameAction::DeclareVictory)
            && game.teams[crate::player::team_of(self.seat) as usize].score
                >= crate::game::WINNING_SCORE
        {
            return Some(GameAction::DeclareVictory);
        }

        // Sing whatever is available, trump suit first
        let mut cantes: Vec<_> = actions
            .iter()
            .filter_map(|a| match a {
                GameAction::DeclareCante { suit } => Some(*suit),
                _ => None,
            })
            .collect();
        cantes.sort_by_key(|s| *s != game.trump_suit);
        if let Some(suit) = cantes.first() {
            return Some(GameAction::DeclareCante { suit: *suit });
        }

        // The seven swap is free value
        if actions.contains(&GameAction::Cambiar7) {
            return Some(GameAction::Cambiar7);
        }

        let plays: Vec<Card> = actions
            .iter()
            .filter_map(|a| match a {
                GameAction::PlayCard { card } => Some(*card),
                _ => None,
            })
            .collect();
        if plays.is_empty() {
            return actions.choose(&mut self.rng).cloned();
        }

        // Leading: throw the cheapest card. Following: win cheaply if the
        // trick is worth something, otherwise slough the cheapest.
        let card = if game.current_trick.is_empty() {
            cheapest(&plays)
        } else {
            let pot: u32 = game.current_trick.iter().map(|tc| tc.card.points()).sum();
            let winners: Vec<Card> = plays
                .iter()
                .copied()
                .filter(|c| self.would_win(game, *c))
                .collect();
            if pot >= 10 && !winners.is_empty() {
                cheapest(&winners)
            } else {
                cheapest(&plays)
            }
        };
        Some(GameAction::PlayCard { card })
    }

    /// Hard: evaluate every candidate against the live trick
    fn choose_hard(&mut self, game: &GameState, actions: &[GameAction]) -> Option<GameAction> {
        if actions.contains(&GameAction::DeclareVictory)
            && game.teams[crate::player::team_of(self.seat) as usize].score
                >= crate::game::WINNING_SCORE
        {
            return Some(GameAction::DeclareVictory);
        }
        if let Some(cante) = actions
            .iter()
            .find(|a| matches!(a, GameAction::DeclareCante { .. }))
        {
            return Some(cante.clone());
        }
        if actions.contains(&GameAction::Cambiar7) {
            return Some(GameAction::Cambiar7);
        }

        let plays: Vec<Card> = actions
            .iter()
            .filter_map(|a| match a {
                GameAction::PlayCard { card } => Some(*card),
                _ => None,
            })
            .collect();
        if plays.is_empty() {
            return actions.choose(&mut self.rng).cloned();
        }

        let mut best: Option<(Card, i32)> = None;
        for &card in &plays {
            let score = self.score_play(game, card);
            match best {
                None => best = Some((card, score)),
                Some((_, best_score)) if score > best_score => best = Some((card, score)),
                _ => {}
            }
        }
        best.map(|(card, _)| GameAction::PlayCard { card })
    }

    /// Heuristic value of throwing `card` right now
    fn score_play(&self, game: &GameState, card: Card) -> i32 {
        let trump = game.trump_suit;
        let pot: i32 = game
            .current_trick
            .iter()
            .map(|tc| tc.card.points() as i32)
            .sum();
        let own_points = card.points() as i32;

        let trump_cost = match self.personality {
            BotPersonality::Cautious => 8,
            BotPersonality::Balanced => 5,
            BotPersonality::Aggressive => 2,
        };

        let mut score = 0;

        if game.current_trick.is_empty() {
            // Leading: keep trumps and point cards back
            score -= own_points * 3;
            if card.suit == trump {
                score -= trump_cost * 4;
            }
            // Late in arrastre a master card cashes points
            if game.phase == GamePhase::Arrastre && own_points >= 10 {
                score += 12;
            }
            return score;
        }

        let partner_winning = winning_seat(&game.current_trick, trump)
            == Some(partner_of(self.seat));
        let wins = self.would_win(game, card);
        let last_to_act = game.current_trick.len() == 3;

        if partner_winning {
            // Feed points to a winning partner, cheapest first otherwise
            score += own_points * 2;
            if card.suit == trump {
                score -= trump_cost * 3;
            }
        } else if wins {
            score += pot * 2 + own_points;
            if last_to_act {
                score += 10;
            }
            if card.suit == trump {
                score -= trump_cost;
            }
            // Do not overspend strength on an empty pot
            if pot == 0 {
                score -= card.value.strength() as i32;
            }
        } else {
            // Sloughing: dump the cheapest, never gift points
            score -= own_points * 4;
            score -= card.value.strength() as i32;
        }

        score
    }

    fn would_win(&self, game: &GameState, card: Card) -> bool {
        let mut trick = game.current_trick.clone();
        trick.push(crate::trick::TrickCard {
            seat: self.seat,
            card,
        });
        winning_seat(&trick, game.trump_suit) == Some(self.seat)
    }
}

/// Cheapest card: fewest points, then weakest
fn cheapest(cards: &[Card]) -> Card {
    let mut best = cards[0];
    for &c in &cards[1..] {
        let key = (c.points(), c.value.strength());
        let best_key = (best.points(), best.value.strength());
        if key < best_key {
            best = c;
        }
    }
    best
}
