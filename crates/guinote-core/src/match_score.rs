//! Match progression: partida -> coto -> coton.
//!
//! Purely additive bookkeeping over already-decided partida outcomes. No
//! card logic lives here; the reducer feeds finished partidas in and reads
//! back whether a coto or the whole match fell.

use crate::player::{TeamIndex, TEAM_COUNT};
use serde::{Deserialize, Serialize};

/// Partidas needed to take a coto ("malas" then "buenas")
pub const PARTIDAS_PER_COTO: u8 = 2;

/// How long the match runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    /// A single coto
    Coto,
    /// First to two cotos
    Coton,
    /// First to three cotos
    CotonLargo,
}

impl MatchFormat {
    /// Cotos needed to win the match
    pub fn cotos_to_win(&self) -> u8 {
        match self {
            MatchFormat::Coto => 1,
            MatchFormat::Coton => 2,
            MatchFormat::CotonLargo => 3,
        }
    }
}

/// Which partida of the running coto is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetLabel {
    /// No partida decided yet in this coto
    Malas,
    /// At least one partida on the board
    Buenas,
}

/// What a recorded partida amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The coto continues
    PartidaWon,
    /// The winning team completed a coto; partida counters reset
    CotoWon,
    /// The winning team reached the format's coto threshold
    MatchWon,
}

/// Standing of the match across partidas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub format: MatchFormat,
    /// Partidas won per team within the current coto
    pub partidas: [u8; TEAM_COUNT],
    /// Cotos won per team
    pub cotos: [u8; TEAM_COUNT],
    /// Whether the current coto is still in its first partida
    pub set: SetLabel,
}

impl MatchScore {
    pub fn new(format: MatchFormat) -> Self {
        Self {
            format,
            partidas: [0; TEAM_COUNT],
            cotos: [0; TEAM_COUNT],
            set: SetLabel::Malas,
        }
    }

    /// Fold one finished partida into the standing
    pub fn record_partida(&mut self, winner: TeamIndex) -> MatchOutcome {
        let w = winner as usize;
        self.partidas[w] += 1;
        self.set = SetLabel::Buenas;

        if self.partidas[w] < PARTIDAS_PER_COTO {
            return MatchOutcome::PartidaWon;
        }

        // Coto taken: reset the sub-counters for the next one
        self.cotos[w] += 1;
        self.partidas = [0; TEAM_COUNT];
        self.set = SetLabel::Malas;

        if self.cotos[w] >= self.format.cotos_to_win() {
            MatchOutcome::MatchWon
        } else {
            MatchOutcome::CotoWon
        }
    }

    /// Whether some team has already won the match
    pub fn is_finished(&self) -> bool {
        self.cotos.iter().any(|&c| c >= self.format.cotos_to_win())
    }

    /// The match winner, if decided
    pub fn winner(&self) -> Option<TeamIndex> {
        self.cotos
            .iter()
            .position(|&c| c >= self.format.cotos_to_win())
            .map(|t| t as TeamIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_partida_keeps_coto_open() {
        let mut score = MatchScore::new(MatchFormat::Coto);
        assert_eq!(score.set, SetLabel::Malas);

        let outcome = score.record_partida(0);
        assert_eq!(outcome, MatchOutcome::PartidaWon);
        assert_eq!(score.partidas, [1, 0]);
        assert_eq!(score.set, SetLabel::Buenas);
        assert!(!score.is_finished());
    }

    #[test]
    fn test_two_partidas_take_the_coto() {
        let mut score = MatchScore::new(MatchFormat::Coto);
        score.record_partida(1);
        let outcome = score.record_partida(1);

        assert_eq!(outcome, MatchOutcome::MatchWon);
        assert_eq!(score.cotos, [0, 1]);
        assert_eq!(score.partidas, [0, 0]);
        assert_eq!(score.winner(), Some(1));
    }

    #[test]
    fn test_split_partidas_extend_the_coto() {
        let mut score = MatchScore::new(MatchFormat::Coto);
        score.record_partida(0);
        score.record_partida(1);
        assert_eq!(score.partidas, [1, 1]);
        assert!(!score.is_finished());

        let outcome = score.record_partida(0);
        assert_eq!(outcome, MatchOutcome::MatchWon);
        assert_eq!(score.winner(), Some(0));
    }

    #[test]
    fn test_coton_needs_two_cotos() {
        let mut score = MatchScore::new(MatchFormat::Coton);
        score.record_partida(0);
        let first_coto = score.record_partida(0);
        assert_eq!(first_coto, MatchOutcome::CotoWon);
        assert_eq!(score.cotos, [1, 0]);
        assert_eq!(score.set, SetLabel::Malas);
        assert!(!score.is_finished());

        score.record_partida(0);
        let second_coto = score.record_partida(0);
        assert_eq!(second_coto, MatchOutcome::MatchWon);
        assert_eq!(score.winner(), Some(0));
    }

    #[test]
    fn test_coton_largo_threshold() {
        assert_eq!(MatchFormat::CotonLargo.cotos_to_win(), 3);
        let mut score = MatchScore::new(MatchFormat::CotonLargo);
        for _ in 0..2 {
            score.record_partida(1);
            score.record_partida(1);
        }
        assert_eq!(score.cotos, [0, 2]);
        assert!(!score.is_finished());
    }
}
