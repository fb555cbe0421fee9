//! Event Lifecycle Controller: drives one event through
//! `DRAFT -> GENERATED -> IN_PROGRESS -> COMPLETED`.

use crate::engines::{GameForRating, RatingEngine};
use crate::generator::{self, GenerationOutcome, GeneratorInput, ParticipantRating};
use crate::replay::ReplayOrchestrator;
use crate::stats::{rating_input, record_stats};
use app_core::utils::validation::{FieldError, ValidationErrors};
use app_core::{
    expected_participant_count, CoreError, CoreResult, Event, EventStatus, Game, GamePosition,
    NewGame, PersistencePort, Player, PlayerStats, RatingUpdateRecord,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

pub struct LifecycleController<P: PersistencePort + ?Sized> {
    port: Arc<P>,
}

/// result of a one-shot rating calculation over an event's games.
#[derive(Debug, Clone)]
pub struct CompleteResponse {
    pub rating_updates: Vec<RatingUpdateRecord>,
}

impl<P: PersistencePort + ?Sized> LifecycleController<P> {
    pub fn new(port: Arc<P>) -> Self {
        Self { port }
    }

    pub async fn create_event(
        &self,
        group_id: Uuid,
        name: Option<String>,
        starts_at: Option<OffsetDateTime>,
        courts: u32,
        rounds: u32,
        participants: Vec<Uuid>,
    ) -> CoreResult<Event> {
        let mut errors = ValidationErrors::new();
        if courts == 0 {
            errors.add(
                FieldError::builder()
                    .set_field("courts")
                    .add_required()
                    .add_message("courts must be at least 1")
                    .build(),
            );
        }
        if rounds == 0 {
            errors.add(
                FieldError::builder()
                    .set_field("rounds")
                    .add_required()
                    .add_message("rounds must be at least 1")
                    .build(),
            );
        }
        let expected = expected_participant_count(courts);
        if participants.len() != expected {
            errors.add(
                FieldError::builder()
                    .set_field("participants")
                    .add_user_defined_code("participant_count_mismatch")
                    .add_message(format!(
                        "expected {expected} participants for {courts} courts, got {}",
                        participants.len()
                    ))
                    .add_params("expected".to_string(), expected.to_string())
                    .add_params("actual".to_string(), participants.len().to_string())
                    .build(),
            );
        }
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }

        let event = self
            .port
            .create_event(group_id, name, starts_at, courts, rounds, participants)
            .await?;
        log::debug!("created event {} in group {} (DRAFT)", event.id, group_id);
        Ok(event)
    }

    /// runs the Schedule Generator against the event's current roster and
    /// persists the resulting games. `new_seed = false` reuses the event id
    /// as seed for a reproducible regenerate.
    pub async fn generate(&self, event_id: Uuid, new_seed: bool) -> CoreResult<Event> {
        let event = self.get_event(event_id).await?;
        if event.status == EventStatus::Completed {
            return Err(CoreError::StateViolation("cannot regenerate a completed event".into()));
        }
        if event.participants.len() != event.expected_participant_count() {
            return Err(FieldError::builder()
                .set_field("participants")
                .add_user_defined_code("participant_count_mismatch")
                .add_message(format!(
                    "event invariant violated: expected {} participants for {} courts, got {}",
                    event.expected_participant_count(),
                    event.courts,
                    event.participants.len()
                ))
                .build()
                .into());
        }

        let group = self
            .port
            .get_group(event.group_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(event.group_id.to_string()))?;
        let settings = group.settings;

        let players = self.port.list_players_by_group(event.group_id).await?;
        let players_by_id: HashMap<Uuid, &Player> = players.iter().map(|p| (p.id, p)).collect();

        let participants: Vec<ParticipantRating> = event
            .participants
            .iter()
            .map(|id| {
                players_by_id
                    .get(id)
                    .map(|p| ParticipantRating {
                        id: *id,
                        rating: p.rating,
                        display_name: p.display_name.clone(),
                    })
                    .ok_or_else(|| CoreError::NotFound(id.to_string()))
            })
            .collect::<CoreResult<_>>()?;

        let previous_teammate_pairs = if !settings.no_repeat_teammate_from_previous_event {
            HashSet::new()
        } else {
            match self
                .port
                .get_previous_completed_event(event.group_id, event_id)
                .await?
            {
                Some(prev) => self
                    .port
                    .get_teammate_pairs(prev.id)
                    .await?
                    .into_iter()
                    .collect::<HashSet<_>>(),
                None => HashSet::new(),
            }
        };

        let seed = if new_seed { None } else { Some(event_id.simple().to_string()) };

        let input = GeneratorInput {
            participants,
            courts: event.courts,
            rounds: event.rounds,
            no_repeat_teammate_in_event: settings.no_repeat_teammate_in_event,
            no_repeat_teammate_from_previous_event: settings.no_repeat_teammate_from_previous_event,
            no_repeat_opponent_in_event: settings.no_repeat_opponent_in_event,
            elo_diff: settings.elo_diff,
            auto_relax_elo_diff: settings.auto_relax_elo_diff,
            auto_relax_step: settings.auto_relax_step,
            auto_relax_max_elo_diff: settings.auto_relax_max_elo_diff,
            previous_teammate_pairs,
            seed,
        };

        match generator::generate(input) {
            GenerationOutcome::Success { games, metadata } => {
                self.port.delete_by_event(event_id).await?;
                let new_games: Vec<NewGame> = games
                    .into_iter()
                    .map(|g| {
                        let team1_elo =
                            (players_by_id[&g.team1.0].rating + players_by_id[&g.team1.1].rating) / 2.0;
                        let team2_elo =
                            (players_by_id[&g.team2.0].rating + players_by_id[&g.team2.1].rating) / 2.0;
                        NewGame {
                            round_index: g.round_index,
                            court_index: g.court_index,
                            team1: g.team1,
                            team2: g.team2,
                            team1_elo,
                            team2_elo,
                        }
                    })
                    .collect();
                self.port.create_many(event_id, new_games).await?;
                self.port
                    .update_status(event_id, EventStatus::Generated, Some(metadata))
                    .await?;
                log::debug!("event {} generated ({} rounds x {} courts)", event_id, event.rounds, event.courts);
            }
            GenerationOutcome::Failure { error, metadata } => {
                self.port
                    .update_status(event_id, event.status, Some(metadata))
                    .await?;
                log::warn!("schedule generation failed for event {event_id}: {error}");
                return Err(CoreError::Generator(error));
            }
        }

        self.get_event(event_id).await
    }

    /// exchanges two players within a round; returns non-blocking warnings
    /// (constraint re-validation after a swap is explicitly not enforced).
    pub async fn swap(
        &self,
        event_id: Uuid,
        round_index: usize,
        player1: Uuid,
        player2: Uuid,
    ) -> CoreResult<Vec<String>> {
        let event = self.get_event(event_id).await?;
        if event.status == EventStatus::Completed {
            return Err(CoreError::StateViolation("cannot swap positions in a completed event".into()));
        }

        let round_games: Vec<Game> = self
            .port
            .list_by_event(event_id)
            .await?
            .into_iter()
            .filter(|g| g.round_index == round_index)
            .collect();
        let (game1, pos1) = locate_player(&round_games, player1)
            .ok_or_else(|| CoreError::NotFound(format!("player {player1} in round {round_index}")))?;
        let (game2, pos2) = locate_player(&round_games, player2)
            .ok_or_else(|| CoreError::NotFound(format!("player {player2} in round {round_index}")))?;

        self.port.swap_positions(game1, pos1, game2, pos2).await?;

        let mut warnings = Vec::new();
        if let Some(prev) = self
            .port
            .get_previous_completed_event(event.group_id, event_id)
            .await?
        {
            let previous_pairs: HashSet<(Uuid, Uuid)> =
                self.port.get_teammate_pairs(prev.id).await?.into_iter().collect();
            let games = self.port.list_by_event(event_id).await?;
            for g in games.iter().filter(|g| g.id == game1 || g.id == game2) {
                for pair in g.teammate_pairs() {
                    if previous_pairs.contains(&pair) {
                        warnings.push(format!(
                            "players {} and {} were teammates in the previous event",
                            pair.0, pair.1
                        ));
                    }
                }
            }
        }

        if event.status == EventStatus::Generated {
            self.port.update_status(event_id, EventStatus::InProgress, None).await?;
        }
        log::debug!("swapped positions in event {event_id}: {} warning(s)", warnings.len());
        Ok(warnings)
    }

    /// records a game's score; cascades to a full group replay if the owning
    /// event was already `COMPLETED`.
    pub async fn update_score(
        &self,
        event_id: Uuid,
        game_id: Uuid,
        score1: Option<f64>,
        score2: Option<f64>,
    ) -> CoreResult<Game> {
        let event = self.get_event(event_id).await?;
        if event.status == EventStatus::Draft {
            return Err(CoreError::StateViolation("cannot score a game before the event is generated".into()));
        }

        let game = self.port.update_score(game_id, score1, score2).await?;

        match event.status {
            EventStatus::Generated => {
                self.port.update_status(event_id, EventStatus::InProgress, None).await?;
            }
            EventStatus::Completed => {
                log::warn!("score update on completed event {event_id} triggers a full group replay");
                ReplayOrchestrator::new(self.port.clone())
                    .recalculate(event.group_id)
                    .await?;
            }
            EventStatus::Draft | EventStatus::InProgress => {}
        }

        Ok(game)
    }

    /// one-shot batch rating calculation over every scored game of the event.
    pub async fn complete(&self, event_id: Uuid) -> CoreResult<CompleteResponse> {
        let event = self.get_event(event_id).await?;
        match event.status {
            EventStatus::Completed => {
                return Err(CoreError::StateViolation("event is already completed".into()))
            }
            EventStatus::Draft => {
                return Err(CoreError::StateViolation("cannot complete an ungenerated event".into()))
            }
            EventStatus::Generated | EventStatus::InProgress => {}
        }

        let group = self
            .port
            .get_group(event.group_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(event.group_id.to_string()))?;
        let settings = group.settings;

        let games_with_players = self.port.list_by_event_with_players(event_id).await?;
        let players = self.port.list_players_by_group(event.group_id).await?;

        let mut current_ratings: HashMap<Uuid, f64> = players.iter().map(|p| (p.id, p.rating)).collect();
        let mut stats: HashMap<Uuid, PlayerStats> = players.iter().map(|p| (p.id, p.stats)).collect();

        let games_for_rating: Vec<GameForRating> = games_with_players
            .iter()
            .map(|gwp| GameForRating {
                team1: (
                    rating_input(&gwp.team1.0, &current_ratings),
                    rating_input(&gwp.team1.1, &current_ratings),
                ),
                team2: (
                    rating_input(&gwp.team2.0, &current_ratings),
                    rating_input(&gwp.team2.1, &current_ratings),
                ),
                result: gwp.game.result(),
                score1: gwp.game.score1,
                score2: gwp.game.score2,
            })
            .collect();

        for gwp in &games_with_players {
            record_stats(&mut stats, gwp);
        }

        let engine = RatingEngine::for_system(settings.rating_system, settings.k_factor, settings.elo_const);
        let deltas = engine.calculate_deltas(&games_for_rating, &current_ratings);

        let mut records = Vec::with_capacity(deltas.len());
        for delta in deltas {
            current_ratings.insert(delta.player_id, delta.rating_after);
            let player_stats = stats.get(&delta.player_id).copied().unwrap_or_default();
            self.port
                .update_rating_and_stats(delta.player_id, delta.rating_after, player_stats)
                .await?;
            records.push(RatingUpdateRecord {
                event_id,
                player_id: delta.player_id,
                rating_before: delta.rating_before,
                rating_after: delta.rating_after,
                delta: delta.delta,
                system: settings.rating_system,
            });
        }
        self.port.append_many(records.clone()).await?;
        self.port.update_status(event_id, EventStatus::Completed, None).await?;
        log::debug!("event {event_id} completed, {} players rated", current_ratings.len());
        Ok(CompleteResponse { rating_updates: records })
    }

    /// deletes an event; `DRAFT | GENERATED | IN_PROGRESS` may be deleted,
    /// `COMPLETED` may not (its rating updates have already been applied).
    pub async fn delete_event(&self, event_id: Uuid) -> CoreResult<()> {
        let event = self.get_event(event_id).await?;
        if event.status == EventStatus::Completed {
            return Err(CoreError::StateViolation("cannot delete a completed event".into()));
        }
        self.port.delete_event(event_id).await?;
        log::debug!("deleted event {event_id}");
        Ok(())
    }

    async fn get_event(&self, event_id: Uuid) -> CoreResult<Event> {
        self.port
            .get_event(event_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(event_id.to_string()))
    }
}

/// resolves a player to the game and position they occupy among `games`.
fn locate_player(games: &[Game], player: Uuid) -> Option<(Uuid, GamePosition)> {
    for g in games {
        if g.team1.0 == player {
            return Some((g.id, GamePosition::Team1P1));
        }
        if g.team1.1 == player {
            return Some((g.id, GamePosition::Team1P2));
        }
        if g.team2.0 == player {
            return Some((g.id, GamePosition::Team2P1));
        }
        if g.team2.1 == player {
            return Some((g.id, GamePosition::Team2P2));
        }
    }
    None
}
