// Catch-Up ELO: compressive variant of Serious ELO, not strictly zero-sum

use crate::engines::base::{actual_score_team1, expected_score, team_average, DeltaAccumulator, GameForRating, RatingDelta};
use app_core::GameResult;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

const GAIN_BOOST_MAX: f64 = 0.50;
const GAIN_REDUCTION_MAX: f64 = 0.30;
const LOSS_PENALTY_MAX: f64 = 0.20;

pub struct CatchUpElo {
    pub k_factor: f64,
    pub elo_const: f64,
}

impl CatchUpElo {
    pub fn calculate_deltas(&self, games: &[GameForRating], current_ratings: &HashMap<Uuid, f64>) -> Vec<RatingDelta> {
        let mut acc = DeltaAccumulator::default();

        // median is computed over the players appearing in this batch, not the full group.
        let mut seen = HashSet::new();
        let mut ratings_in_batch: Vec<f64> = Vec::new();
        for game in games {
            for p in [&game.team1.0, &game.team1.1, &game.team2.0, &game.team2.1] {
                if seen.insert(p.player_id) {
                    ratings_in_batch.push(current_ratings.get(&p.player_id).copied().unwrap_or(p.rating));
                }
            }
        }
        let median = median_of(&mut ratings_in_batch);

        for game in games {
            if game.result == GameResult::Unset {
                continue;
            }

            let team1_rating = team_average(&game.team1.0, &game.team1.1);
            let team2_rating = team_average(&game.team2.0, &game.team2.1);
            let expected_team1 = expected_score(team1_rating, team2_rating, self.elo_const);
            let actual_team1 = actual_score_team1(game.result);
            let base_delta_team1 = self.k_factor * (actual_team1 - expected_team1);

            for p in [&game.team1.0, &game.team1.1] {
                let rating = current_ratings.get(&p.player_id).copied().unwrap_or(p.rating);
                let adjusted = adjust(base_delta_team1, rating, median);
                acc.add(p.player_id, &p.display_name, p.rating, adjusted);
            }
            for p in [&game.team2.0, &game.team2.1] {
                let rating = current_ratings.get(&p.player_id).copied().unwrap_or(p.rating);
                let adjusted = adjust(-base_delta_team1, rating, median);
                acc.add(p.player_id, &p.display_name, p.rating, adjusted);
            }
        }

        acc.into_deltas(current_ratings)
    }
}

fn median_of(ratings: &mut [f64]) -> f64 {
    if ratings.is_empty() {
        return 1000.0;
    }
    ratings.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = ratings.len();
    if n.is_multiple_of(2) {
        (ratings[n / 2 - 1] + ratings[n / 2]) / 2.0
    } else {
        ratings[n / 2]
    }
}

fn adjust(base_delta: f64, player_rating: f64, median: f64) -> f64 {
    if median == 0.0 {
        return base_delta;
    }
    let distance_ratio = ((player_rating - median) / median).clamp(-0.5, 0.5);

    if base_delta > 0.0 {
        if player_rating < median {
            let boost = GAIN_BOOST_MAX * distance_ratio.abs() * 2.0;
            base_delta * (1.0 + boost)
        } else {
            let reduction = GAIN_REDUCTION_MAX * distance_ratio.abs() * 2.0;
            base_delta * (1.0 - reduction)
        }
    } else if player_rating > median {
        let penalty = LOSS_PENALTY_MAX * distance_ratio.abs() * 2.0;
        base_delta * (1.0 + penalty)
    } else {
        base_delta
    }
}
