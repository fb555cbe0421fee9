// a single 2v2 match within an event

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// result tag of a game, derived from its scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Team1Win,
    Team2Win,
    Tie,
    Unset,
}

impl GameResult {
    /// derive the result tag from scores: `score1 > score2 -> Team1Win`;
    /// `<` -> `Team2Win`; `==` -> `Tie`; either missing -> `Unset`.
    pub fn from_scores(score1: Option<f64>, score2: Option<f64>) -> Self {
        match (score1, score2) {
            (Some(s1), Some(s2)) if s1 > s2 => GameResult::Team1Win,
            (Some(s1), Some(s2)) if s1 < s2 => GameResult::Team2Win,
            (Some(_), Some(_)) => GameResult::Tie,
            _ => GameResult::Unset,
        }
    }
}

/// two distinct players forming one side of a game
pub type Team = (Uuid, Uuid);

/// a single 2v2 match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub event_id: Uuid,
    pub round_index: usize,
    pub court_index: usize,
    pub team1: Team,
    pub team2: Team,
    pub score1: Option<f64>,
    pub score2: Option<f64>,
    /// set by a swap operation; does not re-validate hard constraints
    pub swapped: bool,
    /// mean of both players' pre-round ratings, frozen at the moment the game
    /// was rated (either generation time or replay time)
    pub team1_elo: Option<f64>,
    pub team2_elo: Option<f64>,
}

impl Game {
    pub fn result(&self) -> GameResult {
        GameResult::from_scores(self.score1, self.score2)
    }

    pub fn all_players(&self) -> HashSet<Uuid> {
        HashSet::from([self.team1.0, self.team1.1, self.team2.0, self.team2.1])
    }

    /// unordered teammate pairs of this game
    pub fn teammate_pairs(&self) -> [(Uuid, Uuid); 2] {
        [unordered(self.team1.0, self.team1.1), unordered(self.team2.0, self.team2.1)]
    }

    /// all four unordered opposing pairs of this game
    pub fn opponent_pairs(&self) -> [(Uuid, Uuid); 4] {
        [
            unordered(self.team1.0, self.team2.0),
            unordered(self.team1.0, self.team2.1),
            unordered(self.team1.1, self.team2.0),
            unordered(self.team1.1, self.team2.1),
        ]
    }

    /// which team (1 or 2) a player appears on, if any
    pub fn team_of(&self, player: Uuid) -> Option<u8> {
        if self.team1.0 == player || self.team1.1 == player {
            Some(1)
        } else if self.team2.0 == player || self.team2.1 == player {
            Some(2)
        } else {
            None
        }
    }
}

/// canonical, order-independent representation of an unordered pair,
/// used as a hash key for teammate/opponent tracking
pub fn unordered(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
