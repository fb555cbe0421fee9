// Rac's ELO: individual-vs-opponent-mean, score-proportional K-factor

use crate::engines::base::{team_average, DeltaAccumulator, GameForRating, RatingDelta};
use app_core::GameResult;
use std::collections::HashMap;
use uuid::Uuid;

pub struct RacsElo {
    pub k_factor: f64,
    pub elo_const: f64,
}

impl RacsElo {
    pub fn calculate_deltas(&self, games: &[GameForRating], current_ratings: &HashMap<Uuid, f64>) -> Vec<RatingDelta> {
        let mut acc = DeltaAccumulator::default();

        for game in games {
            if game.result == GameResult::Unset {
                continue;
            }

            let (p1, p2) = (&game.team1.0, &game.team1.1);
            let (p3, p4) = (&game.team2.0, &game.team2.1);

            if game.result == GameResult::Tie {
                // ties produce zero change; still record presence for determinism.
                for p in [p1, p2, p3, p4] {
                    acc.touch(p.player_id, &p.display_name, p.rating);
                }
                continue;
            }

            let team1_avg = team_average(p1, p2);
            let team2_avg = team_average(p3, p4);
            let e1 = self.expected(p1.rating, team2_avg);
            let e2 = self.expected(p2.rating, team2_avg);
            let e3 = self.expected(p3.rating, team1_avg);
            let e4 = self.expected(p4.rating, team1_avg);

            let k = match (game.score1, game.score2) {
                (Some(s1), Some(s2)) => 10.0 * (s1 - s2).abs(),
                _ => self.k_factor,
            };

            match game.result {
                GameResult::Team1Win => {
                    acc.add(p1.player_id, &p1.display_name, p1.rating, k * e1);
                    acc.add(p2.player_id, &p2.display_name, p2.rating, k * e2);
                    acc.add(p3.player_id, &p3.display_name, p3.rating, k * (e3 - 1.0));
                    acc.add(p4.player_id, &p4.display_name, p4.rating, k * (e4 - 1.0));
                }
                GameResult::Team2Win => {
                    acc.add(p1.player_id, &p1.display_name, p1.rating, k * (e1 - 1.0));
                    acc.add(p2.player_id, &p2.display_name, p2.rating, k * (e2 - 1.0));
                    acc.add(p3.player_id, &p3.display_name, p3.rating, k * e3);
                    acc.add(p4.player_id, &p4.display_name, p4.rating, k * e4);
                }
                GameResult::Tie | GameResult::Unset => unreachable!("handled above"),
            }
        }

        acc.into_deltas(current_ratings)
    }

    /// `E = 1 / (1 + 10^((player_elo - opponent_avg) / (player_elo * elo_const)))`
    fn expected(&self, player_rating: f64, opponent_team_avg: f64) -> f64 {
        if player_rating == 0.0 {
            return 0.5;
        }
        let exponent = (player_rating - opponent_team_avg) / (player_rating * self.elo_const);
        1.0 / (1.0 + 10f64.powf(exponent))
    }
}
