// Serious ELO: standard team-average ELO, zero-sum per game

use crate::engines::base::{actual_score_team1, expected_score, team_average, DeltaAccumulator, GameForRating, RatingDelta};
use app_core::GameResult;
use std::collections::HashMap;
use uuid::Uuid;

pub struct SeriousElo {
    pub k_factor: f64,
    pub elo_const: f64,
}

impl SeriousElo {
    pub fn calculate_deltas(&self, games: &[GameForRating], current_ratings: &HashMap<Uuid, f64>) -> Vec<RatingDelta> {
        let mut acc = DeltaAccumulator::default();

        for game in games {
            if game.result == GameResult::Unset {
                continue;
            }

            let team1_rating = team_average(&game.team1.0, &game.team1.1);
            let team2_rating = team_average(&game.team2.0, &game.team2.1);
            let expected_team1 = expected_score(team1_rating, team2_rating, self.elo_const);
            let actual_team1 = actual_score_team1(game.result);
            let delta_team1 = self.k_factor * (actual_team1 - expected_team1);

            for p in [&game.team1.0, &game.team1.1] {
                acc.add(p.player_id, &p.display_name, p.rating, delta_team1);
            }
            for p in [&game.team2.0, &game.team2.1] {
                acc.add(p.player_id, &p.display_name, p.rating, -delta_team1);
            }
        }

        acc.into_deltas(current_ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::base::PlayerRatingInput;
    use app_core::GameResult;

    fn player(rating: f64) -> PlayerRatingInput {
        PlayerRatingInput {
            player_id: Uuid::new_v4(),
            rating,
            display_name: "p".to_string(),
        }
    }

    #[test]
    fn given_evenly_matched_teams_when_team1_wins_then_delta_is_half_of_k_factor() {
        let engine = SeriousElo { k_factor: 32.0, elo_const: 400.0 };
        let team1 = (player(1000.0), player(1000.0));
        let team2 = (player(1000.0), player(1000.0));
        let team1_ids = game_team1_ids(&team1);
        let mut ratings = HashMap::new();
        for p in [&team1.0, &team1.1, &team2.0, &team2.1] {
            ratings.insert(p.player_id, p.rating);
        }
        let game = GameForRating {
            team1,
            team2,
            result: GameResult::Team1Win,
            score1: Some(21.0),
            score2: Some(15.0),
        };

        let deltas = engine.calculate_deltas(&[game], &ratings);

        assert_eq!(deltas.len(), 4);
        for d in &deltas {
            if team1_ids.contains(&d.player_id) {
                assert!((d.delta - 16.0).abs() < 1e-9);
            } else {
                assert!((d.delta + 16.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn given_unset_game_when_calculating_deltas_then_it_is_skipped() {
        let engine = SeriousElo { k_factor: 32.0, elo_const: 400.0 };
        let team1 = (player(1000.0), player(1000.0));
        let team2 = (player(1000.0), player(1000.0));
        let ratings = HashMap::new();
        let game = GameForRating {
            team1,
            team2,
            result: GameResult::Unset,
            score1: None,
            score2: None,
        };

        let deltas = engine.calculate_deltas(&[game], &ratings);

        assert!(deltas.is_empty());
    }

    fn game_team1_ids(team1: &(PlayerRatingInput, PlayerRatingInput)) -> Vec<Uuid> {
        vec![team1.0.player_id, team1.1.player_id]
    }
}
