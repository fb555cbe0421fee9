// in-memory fake of `PersistencePort`, used by the lifecycle and replay
// integration tests in place of a real database adapter.
#![allow(dead_code)] // shared across test binaries; not every helper is used by every one

use app_core::{
    Event, EventPort, EventStatus, Game, GamePort, GamePosition, GenerationMetadata, Group,
    GroupPort, GroupSettings, MembershipType, NewGame, PersistenceError, PersistenceResult,
    Player, PlayerPort, PlayerSnapshot, PlayerStats, RatingUpdatePort, RatingUpdateRecord,
    SkillTier,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Default)]
pub struct FakePort {
    groups: Mutex<HashMap<Uuid, Group>>,
    players: Mutex<HashMap<Uuid, Player>>,
    events: Mutex<HashMap<Uuid, Event>>,
    games: Mutex<HashMap<Uuid, Game>>,
    rating_updates: Mutex<Vec<RatingUpdateRecord>>,
    previous_event_fetch_count: Mutex<u32>,
}

impl FakePort {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of times `get_previous_completed_event` has been called; used to
    /// assert that callers skip the fetch when it isn't needed.
    pub fn previous_event_fetch_count(&self) -> u32 {
        *self.previous_event_fetch_count.lock().unwrap()
    }

    pub fn seed_group(&self, settings: GroupSettings) -> Uuid {
        let id = Uuid::new_v4();
        self.groups.lock().unwrap().insert(
            id,
            Group { id, name: "test group".to_string(), settings, archived: false },
        );
        id
    }

    pub fn seed_player(&self, group_id: Uuid, display_name: &str, rating: f64) -> Uuid {
        let id = Uuid::new_v4();
        self.players.lock().unwrap().insert(
            id,
            Player {
                id,
                display_name: display_name.to_string(),
                rating,
                stats: PlayerStats::default(),
                membership: MembershipType::Permanent,
                skill_tier: None,
            },
        );
        let _ = group_id;
        id
    }

    pub fn player(&self, id: Uuid) -> Player {
        self.players.lock().unwrap().get(&id).cloned().unwrap()
    }

    pub fn rating_update_count(&self) -> usize {
        self.rating_updates.lock().unwrap().len()
    }

    pub fn games_of(&self, event_id: Uuid) -> Vec<Game> {
        self.games.lock().unwrap().values().filter(|g| g.event_id == event_id).cloned().collect()
    }

    pub fn get_event_for_test(&self, event_id: Uuid) -> Event {
        self.events.lock().unwrap().get(&event_id).cloned().unwrap()
    }

    pub fn list_player_ratings(&self) -> Vec<f64> {
        let players = self.players.lock().unwrap();
        let mut ids: Vec<Uuid> = players.keys().copied().collect();
        ids.sort();
        ids.into_iter().map(|id| players[&id].rating).collect()
    }
}

#[async_trait]
impl GroupPort for FakePort {
    async fn get_group(&self, id: Uuid) -> PersistenceResult<Option<Group>> {
        Ok(self.groups.lock().unwrap().get(&id).cloned())
    }

    async fn get_settings(&self, group_id: Uuid) -> PersistenceResult<GroupSettings> {
        self.groups
            .lock()
            .unwrap()
            .get(&group_id)
            .map(|g| g.settings.clone())
            .ok_or(PersistenceError::NotFound)
    }

    async fn set_archived(&self, group_id: Uuid, archived: bool) -> PersistenceResult<()> {
        let mut groups = self.groups.lock().unwrap();
        let group = groups.get_mut(&group_id).ok_or(PersistenceError::NotFound)?;
        group.archived = archived;
        Ok(())
    }
}

#[async_trait]
impl PlayerPort for FakePort {
    async fn get_player(&self, id: Uuid) -> PersistenceResult<Option<Player>> {
        Ok(self.players.lock().unwrap().get(&id).cloned())
    }

    async fn list_players_by_group(&self, _group_id: Uuid) -> PersistenceResult<Vec<Player>> {
        let mut players: Vec<Player> = self.players.lock().unwrap().values().cloned().collect();
        players.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap());
        Ok(players)
    }

    async fn add_player_to_group(
        &self,
        _group_id: Uuid,
        display_name: &str,
        membership: MembershipType,
        skill_tier: Option<SkillTier>,
        initial_rating: f64,
    ) -> PersistenceResult<Player> {
        let id = Uuid::new_v4();
        let player = Player {
            id,
            display_name: display_name.to_string(),
            rating: initial_rating,
            stats: PlayerStats::default(),
            membership,
            skill_tier,
        };
        self.players.lock().unwrap().insert(id, player.clone());
        Ok(player)
    }

    async fn update_rating_and_stats(&self, player_id: Uuid, rating: f64, stats: PlayerStats) -> PersistenceResult<()> {
        let mut players = self.players.lock().unwrap();
        let player = players.get_mut(&player_id).ok_or(PersistenceError::NotFound)?;
        player.rating = rating;
        player.stats = stats;
        Ok(())
    }

    async fn reset_stats(&self, _group_id: Uuid) -> PersistenceResult<()> {
        for player in self.players.lock().unwrap().values_mut() {
            player.stats = PlayerStats::default();
        }
        Ok(())
    }
}

#[async_trait]
impl EventPort for FakePort {
    async fn get_event(&self, id: Uuid) -> PersistenceResult<Option<Event>> {
        Ok(self.events.lock().unwrap().get(&id).cloned())
    }

    async fn create_event(
        &self,
        group_id: Uuid,
        name: Option<String>,
        starts_at: Option<OffsetDateTime>,
        courts: u32,
        rounds: u32,
        participants: Vec<Uuid>,
    ) -> PersistenceResult<Event> {
        let id = Uuid::new_v4();
        let event = Event {
            id,
            group_id,
            name,
            starts_at,
            created_at: starts_at.unwrap_or_else(|| OffsetDateTime::from_unix_timestamp(0).unwrap()),
            courts,
            rounds,
            participants,
            status: EventStatus::Draft,
            generation_meta: None,
        };
        self.events.lock().unwrap().insert(id, event.clone());
        Ok(event)
    }

    async fn update_status(
        &self,
        event_id: Uuid,
        status: EventStatus,
        generation_meta: Option<GenerationMetadata>,
    ) -> PersistenceResult<()> {
        let mut events = self.events.lock().unwrap();
        let event = events.get_mut(&event_id).ok_or(PersistenceError::NotFound)?;
        event.status = status;
        if generation_meta.is_some() {
            event.generation_meta = generation_meta;
        }
        Ok(())
    }

    async fn delete_event(&self, event_id: Uuid) -> PersistenceResult<()> {
        self.events.lock().unwrap().remove(&event_id);
        Ok(())
    }

    async fn list_events_by_group(
        &self,
        group_id: Uuid,
        status: Option<EventStatus>,
    ) -> PersistenceResult<Vec<Event>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.group_id == group_id && status.is_none_or(|s| e.status == s))
            .cloned()
            .collect())
    }

    async fn list_completed_events_chronological(&self, group_id: Uuid) -> PersistenceResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.group_id == group_id && e.status == EventStatus::Completed)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.starts_at, e.created_at));
        Ok(events)
    }

    async fn get_previous_completed_event(
        &self,
        group_id: Uuid,
        before_event_id: Uuid,
    ) -> PersistenceResult<Option<Event>> {
        *self.previous_event_fetch_count.lock().unwrap() += 1;
        let before = self
            .events
            .lock()
            .unwrap()
            .get(&before_event_id)
            .cloned()
            .ok_or(PersistenceError::NotFound)?;
        let mut completed = self.list_completed_events_chronological(group_id).await?;
        completed.retain(|e| (e.starts_at, e.created_at) < (before.starts_at, before.created_at));
        Ok(completed.into_iter().next_back())
    }

    async fn get_participants(&self, event_id: Uuid) -> PersistenceResult<Vec<Uuid>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .get(&event_id)
            .map(|e| e.participants.clone())
            .unwrap_or_default())
    }

    async fn add_participants(&self, event_id: Uuid, player_ids: &[Uuid]) -> PersistenceResult<()> {
        let mut events = self.events.lock().unwrap();
        let event = events.get_mut(&event_id).ok_or(PersistenceError::NotFound)?;
        event.participants.extend_from_slice(player_ids);
        Ok(())
    }
}

#[async_trait]
impl GamePort for FakePort {
    async fn create_many(&self, event_id: Uuid, games: Vec<NewGame>) -> PersistenceResult<Vec<Game>> {
        let mut store = self.games.lock().unwrap();
        let mut created = Vec::with_capacity(games.len());
        for g in games {
            let id = Uuid::new_v4();
            let game = Game {
                id,
                event_id,
                round_index: g.round_index,
                court_index: g.court_index,
                team1: g.team1,
                team2: g.team2,
                score1: None,
                score2: None,
                swapped: false,
                team1_elo: Some(g.team1_elo),
                team2_elo: Some(g.team2_elo),
            };
            store.insert(id, game.clone());
            created.push(game);
        }
        Ok(created)
    }

    async fn list_by_event(&self, event_id: Uuid) -> PersistenceResult<Vec<Game>> {
        Ok(self.games.lock().unwrap().values().filter(|g| g.event_id == event_id).cloned().collect())
    }

    async fn list_by_event_with_players(&self, event_id: Uuid) -> PersistenceResult<Vec<app_core::GameWithPlayers>> {
        let players = self.players.lock().unwrap();
        let snapshot = |id: Uuid| -> PlayerSnapshot {
            let p = players.get(&id).unwrap();
            PlayerSnapshot { id: p.id, display_name: p.display_name.clone(), rating: p.rating }
        };
        Ok(self
            .games
            .lock()
            .unwrap()
            .values()
            .filter(|g| g.event_id == event_id)
            .map(|g| app_core::GameWithPlayers {
                game: g.clone(),
                team1: (snapshot(g.team1.0), snapshot(g.team1.1)),
                team2: (snapshot(g.team2.0), snapshot(g.team2.1)),
            })
            .collect())
    }

    async fn list_by_player(&self, player_id: Uuid) -> PersistenceResult<Vec<Game>> {
        Ok(self
            .games
            .lock()
            .unwrap()
            .values()
            .filter(|g| g.all_players().contains(&player_id))
            .cloned()
            .collect())
    }

    async fn update_score(&self, game_id: Uuid, score1: Option<f64>, score2: Option<f64>) -> PersistenceResult<Game> {
        let mut games = self.games.lock().unwrap();
        let game = games.get_mut(&game_id).ok_or(PersistenceError::NotFound)?;
        game.score1 = score1;
        game.score2 = score2;
        Ok(game.clone())
    }

    async fn delete_by_event(&self, event_id: Uuid) -> PersistenceResult<()> {
        self.games.lock().unwrap().retain(|_, g| g.event_id != event_id);
        Ok(())
    }

    async fn swap_positions(&self, game1: Uuid, pos1: GamePosition, game2: Uuid, pos2: GamePosition) -> PersistenceResult<()> {
        let mut games = self.games.lock().unwrap();
        let p1 = position_of(games.get(&game1).ok_or(PersistenceError::NotFound)?, pos1);
        let p2 = position_of(games.get(&game2).ok_or(PersistenceError::NotFound)?, pos2);
        set_position(games.get_mut(&game1).unwrap(), pos1, p2);
        set_position(games.get_mut(&game2).unwrap(), pos2, p1);
        games.get_mut(&game1).unwrap().swapped = true;
        games.get_mut(&game2).unwrap().swapped = true;
        Ok(())
    }

    async fn update_elo_snapshot(&self, game_id: Uuid, team1_elo: f64, team2_elo: f64) -> PersistenceResult<()> {
        let mut games = self.games.lock().unwrap();
        let game = games.get_mut(&game_id).ok_or(PersistenceError::NotFound)?;
        game.team1_elo = Some(team1_elo);
        game.team2_elo = Some(team2_elo);
        Ok(())
    }

    async fn get_teammate_pairs(&self, event_id: Uuid) -> PersistenceResult<Vec<(Uuid, Uuid)>> {
        Ok(self
            .games
            .lock()
            .unwrap()
            .values()
            .filter(|g| g.event_id == event_id)
            .flat_map(|g| g.teammate_pairs())
            .collect())
    }
}

fn position_of(game: &Game, pos: GamePosition) -> Uuid {
    match pos {
        GamePosition::Team1P1 => game.team1.0,
        GamePosition::Team1P2 => game.team1.1,
        GamePosition::Team2P1 => game.team2.0,
        GamePosition::Team2P2 => game.team2.1,
    }
}

fn set_position(game: &mut Game, pos: GamePosition, player: Uuid) {
    match pos {
        GamePosition::Team1P1 => game.team1.0 = player,
        GamePosition::Team1P2 => game.team1.1 = player,
        GamePosition::Team2P1 => game.team2.0 = player,
        GamePosition::Team2P2 => game.team2.1 = player,
    }
}

#[async_trait]
impl RatingUpdatePort for FakePort {
    async fn append_many(&self, mut records: Vec<RatingUpdateRecord>) -> PersistenceResult<()> {
        self.rating_updates.lock().unwrap().append(&mut records);
        Ok(())
    }

    async fn delete_all_for_group(&self, _group_id: Uuid) -> PersistenceResult<()> {
        self.rating_updates.lock().unwrap().clear();
        Ok(())
    }

    async fn last_event_rating_before(&self, _group_id: Uuid) -> PersistenceResult<HashMap<Uuid, f64>> {
        let mut map = HashMap::new();
        for record in self.rating_updates.lock().unwrap().iter() {
            map.insert(record.player_id, record.rating_before);
        }
        Ok(map)
    }
}

