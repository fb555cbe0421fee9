//! helpers shared by the Event Lifecycle Controller and the Replay
//! Orchestrator for turning a joined game into rating-engine inputs and
//! per-player stat increments.

use crate::engines::PlayerRatingInput;
use app_core::{GameResult, GameWithPlayers, MatchOutcome, PlayerSnapshot, PlayerStats};
use std::collections::HashMap;
use uuid::Uuid;

pub(crate) fn rating_input(p: &PlayerSnapshot, current_ratings: &HashMap<Uuid, f64>) -> PlayerRatingInput {
    PlayerRatingInput {
        player_id: p.id,
        rating: current_ratings.get(&p.id).copied().unwrap_or(p.rating),
        display_name: p.display_name.clone(),
    }
}

/// increments `games_played`/`wins`/`losses`/`ties` only for the four
/// players who actually appeared in this game; `UNSET` games are skipped.
pub(crate) fn record_stats(stats: &mut HashMap<Uuid, PlayerStats>, gwp: &GameWithPlayers) {
    let (team1_outcome, team2_outcome) = match gwp.game.result() {
        GameResult::Team1Win => (MatchOutcome::Win, MatchOutcome::Loss),
        GameResult::Team2Win => (MatchOutcome::Loss, MatchOutcome::Win),
        GameResult::Tie => (MatchOutcome::Tie, MatchOutcome::Tie),
        GameResult::Unset => return,
    };
    for p in [&gwp.team1.0, &gwp.team1.1] {
        stats.entry(p.id).or_default().record(team1_outcome);
    }
    for p in [&gwp.team2.0, &gwp.team2.1] {
        stats.entry(p.id).or_default().record(team2_outcome);
    }
}
