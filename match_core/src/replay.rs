//! Replay Orchestrator: recomputes every player's rating and stats in a
//! group from scratch by replaying its completed events in chronological
//! order, one round at a time.

use crate::engines::{GameForRating, RatingEngine};
use crate::stats::{rating_input, record_stats};
use app_core::{CoreError, CoreResult, Player, PlayerStats, RatingUpdateRecord};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

pub struct ReplayOrchestrator<P: app_core::PersistencePort + ?Sized> {
    port: Arc<P>,
}

/// one player's final rating after a full recalculation, as reported in the
/// top-5 leaderboard slice of a `RecalculateSummary`.
#[derive(Debug, Clone)]
pub struct TopRating {
    pub player_id: Uuid,
    pub display_name: String,
    pub rating: f64,
}

/// summary of a full group recalculation: how many completed events were
/// replayed, how many players had their rating/stats rewritten, and the
/// final top-5 ratings.
#[derive(Debug, Clone)]
pub struct RecalculateSummary {
    pub events_processed: usize,
    pub players_updated: usize,
    pub top_ratings: Vec<TopRating>,
}

impl<P: app_core::PersistencePort + ?Sized> ReplayOrchestrator<P> {
    pub fn new(port: Arc<P>) -> Self {
        Self { port }
    }

    /// resets the group's ratings to their per-skill-tier initial values and
    /// stats to zero, then replays every `COMPLETED` event in chronological
    /// order, round by round, recomputing deltas with the group's engine.
    pub async fn recalculate(&self, group_id: Uuid) -> CoreResult<RecalculateSummary> {
        let group = self
            .port
            .get_group(group_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(group_id.to_string()))?;
        let settings = group.settings;
        let engine = RatingEngine::for_system(settings.rating_system, settings.k_factor, settings.elo_const);

        let players = self.port.list_players_by_group(group_id).await?;
        let mut ratings: HashMap<Uuid, f64> = HashMap::new();
        let mut stats: HashMap<Uuid, PlayerStats> = HashMap::new();
        for p in &players {
            let starting = Player::starting_rating(p.membership, p.skill_tier, settings.initial_rating);
            ratings.insert(p.id, starting);
            stats.insert(p.id, PlayerStats::default());
        }

        self.port.reset_stats(group_id).await?;
        self.port.delete_all_for_group(group_id).await?;

        let events = self.port.list_completed_events_chronological(group_id).await?;
        let events_processed = events.len();
        let mut records = Vec::new();

        for event in events {
            let games = match self.port.list_by_event_with_players(event.id).await {
                Ok(games) => games,
                Err(err) => {
                    log::warn!("skipping corrupt event {} during replay: {err}", event.id);
                    continue;
                }
            };

            let mut by_round: BTreeMap<usize, Vec<_>> = BTreeMap::new();
            for gwp in games {
                by_round.entry(gwp.game.round_index).or_default().push(gwp);
            }

            // event-start snapshot: rating_before for this event's records is the
            // rating each participant carried into the event, not into any one round.
            let mut event_start_ratings: HashMap<Uuid, f64> = HashMap::new();
            let mut participants: HashSet<Uuid> = HashSet::new();

            for round_games in by_round.into_values() {
                for gwp in &round_games {
                    for p in [&gwp.team1.0, &gwp.team1.1, &gwp.team2.0, &gwp.team2.1] {
                        event_start_ratings.entry(p.id).or_insert_with(|| ratings[&p.id]);
                        participants.insert(p.id);
                    }

                    let team1_elo = (ratings[&gwp.team1.0.id] + ratings[&gwp.team1.1.id]) / 2.0;
                    let team2_elo = (ratings[&gwp.team2.0.id] + ratings[&gwp.team2.1.id]) / 2.0;
                    self.port
                        .update_elo_snapshot(gwp.game.id, team1_elo, team2_elo)
                        .await?;
                }

                let games_for_rating: Vec<GameForRating> = round_games
                    .iter()
                    .map(|gwp| GameForRating {
                        team1: (
                            rating_input(&gwp.team1.0, &ratings),
                            rating_input(&gwp.team1.1, &ratings),
                        ),
                        team2: (
                            rating_input(&gwp.team2.0, &ratings),
                            rating_input(&gwp.team2.1, &ratings),
                        ),
                        result: gwp.game.result(),
                        score1: gwp.game.score1,
                        score2: gwp.game.score2,
                    })
                    .collect();

                for gwp in &round_games {
                    record_stats(&mut stats, gwp);
                }

                let deltas = engine.calculate_deltas(&games_for_rating, &ratings);
                for delta in deltas {
                    ratings.insert(delta.player_id, delta.rating_after);
                }
            }

            // one record per event-player, net of every round's delta.
            for player_id in participants {
                let rating_before = event_start_ratings[&player_id];
                let rating_after = ratings[&player_id];
                let delta = rating_after - rating_before;
                if delta != 0.0 {
                    records.push(RatingUpdateRecord {
                        event_id: event.id,
                        player_id,
                        rating_before,
                        rating_after,
                        delta,
                        system: settings.rating_system,
                    });
                }
            }
        }

        for (player_id, rating) in &ratings {
            let player_stats = stats.get(player_id).copied().unwrap_or_default();
            self.port
                .update_rating_and_stats(*player_id, *rating, player_stats)
                .await?;
        }
        self.port.append_many(records).await?;

        let players_updated = ratings.len();
        let names: HashMap<Uuid, String> = players.iter().map(|p| (p.id, p.display_name.clone())).collect();
        let mut top_ratings: Vec<TopRating> = ratings
            .iter()
            .map(|(id, rating)| TopRating {
                player_id: *id,
                display_name: names[id].clone(),
                rating: *rating,
            })
            .collect();
        top_ratings.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap());
        top_ratings.truncate(5);

        log::debug!("replayed group {group_id}: {} players rerated", players_updated);
        Ok(RecalculateSummary { events_processed, players_updated, top_ratings })
    }
}
