// shared types and helpers for the rating engines

use app_core::GameResult;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PlayerRatingInput {
    pub player_id: Uuid,
    pub rating: f64,
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct GameForRating {
    pub team1: (PlayerRatingInput, PlayerRatingInput),
    pub team2: (PlayerRatingInput, PlayerRatingInput),
    pub result: GameResult,
    pub score1: Option<f64>,
    pub score2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingDelta {
    pub player_id: Uuid,
    pub display_name: String,
    pub rating_before: f64,
    pub rating_after: f64,
    pub delta: f64,
}

/// accumulates per-player deltas while preserving first-appearance order,
/// so every engine sums in a defined, reproducible iteration order.
#[derive(Default)]
pub struct DeltaAccumulator {
    order: Vec<Uuid>,
    deltas: std::collections::HashMap<Uuid, f64>,
    info: std::collections::HashMap<Uuid, (String, f64)>,
}

impl DeltaAccumulator {
    pub fn add(&mut self, player_id: Uuid, display_name: &str, rating: f64, delta: f64) {
        if !self.deltas.contains_key(&player_id) {
            self.order.push(player_id);
            self.info.insert(player_id, (display_name.to_string(), rating));
        }
        *self.deltas.entry(player_id).or_insert(0.0) += delta;
    }

    /// note a player's presence without contributing a delta (e.g. a tie in
    /// an engine where ties produce zero change for all four players).
    pub fn touch(&mut self, player_id: Uuid, display_name: &str, rating: f64) {
        self.add(player_id, display_name, rating, 0.0);
    }

    pub fn into_deltas(self, current_ratings: &std::collections::HashMap<Uuid, f64>) -> Vec<RatingDelta> {
        self.order
            .into_iter()
            .map(|id| {
                let (display_name, fallback_rating) = self.info.get(&id).cloned().unwrap_or_default();
                let rating_before = current_ratings.get(&id).copied().unwrap_or(fallback_rating);
                let delta = self.deltas.get(&id).copied().unwrap_or(0.0);
                RatingDelta {
                    player_id: id,
                    display_name,
                    rating_before,
                    rating_after: rating_before + delta,
                    delta,
                }
            })
            .collect()
    }
}

pub fn team_average(a: &PlayerRatingInput, b: &PlayerRatingInput) -> f64 {
    (a.rating + b.rating) / 2.0
}

/// standard ELO expected score of a team rated `rating_a` against `rating_b`.
pub fn expected_score(rating_a: f64, rating_b: f64, elo_const: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / elo_const))
}

/// actual score for team 1's perspective; `UNSET` games must be filtered out
/// by the caller before reaching this, `TIE` and `UNSET` both resolve to 0.5.
pub fn actual_score_team1(result: GameResult) -> f64 {
    match result {
        GameResult::Team1Win => 1.0,
        GameResult::Team2Win => 0.0,
        GameResult::Tie | GameResult::Unset => 0.5,
    }
}
