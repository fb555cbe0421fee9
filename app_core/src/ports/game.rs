// game port

use crate::{Game, PersistenceResult, Team};
use async_trait::async_trait;
use uuid::Uuid;

/// a game to be inserted, before an id has been assigned
#[derive(Debug, Clone)]
pub struct NewGame {
    pub round_index: usize,
    pub court_index: usize,
    pub team1: Team,
    pub team2: Team,
    pub team1_elo: f64,
    pub team2_elo: f64,
}

/// a snapshot of a player's identity and rating at the moment a game was joined
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub id: Uuid,
    pub display_name: String,
    pub rating: f64,
}

/// a game joined with its four players' display names and pre-event ratings,
/// as consumed by the Rating Engines and the Replay Orchestrator.
#[derive(Debug, Clone)]
pub struct GameWithPlayers {
    pub game: Game,
    pub team1: (PlayerSnapshot, PlayerSnapshot),
    pub team2: (PlayerSnapshot, PlayerSnapshot),
}

/// one of the four team positions of a game, addressed by a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePosition {
    Team1P1,
    Team1P2,
    Team2P1,
    Team2P2,
}

/// game-level persistence operations consumed by the core.
#[async_trait]
pub trait GamePort: Send + Sync {
    async fn create_many(&self, event_id: Uuid, games: Vec<NewGame>) -> PersistenceResult<Vec<Game>>;

    async fn list_by_event(&self, event_id: Uuid) -> PersistenceResult<Vec<Game>>;

    async fn list_by_event_with_players(
        &self,
        event_id: Uuid,
    ) -> PersistenceResult<Vec<GameWithPlayers>>;

    async fn list_by_player(&self, player_id: Uuid) -> PersistenceResult<Vec<Game>>;

    /// updates scores; the result tag is derived by the caller from the new scores
    async fn update_score(
        &self,
        game_id: Uuid,
        score1: Option<f64>,
        score2: Option<f64>,
    ) -> PersistenceResult<Game>;

    async fn delete_by_event(&self, event_id: Uuid) -> PersistenceResult<()>;

    /// exchanges the players at two positions, marking both games `swapped`.
    /// `game1 == game2` is a same-game position swap.
    async fn swap_positions(
        &self,
        game1: Uuid,
        pos1: GamePosition,
        game2: Uuid,
        pos2: GamePosition,
    ) -> PersistenceResult<()>;

    async fn update_elo_snapshot(
        &self,
        game_id: Uuid,
        team1_elo: f64,
        team2_elo: f64,
    ) -> PersistenceResult<()>;

    /// the teammate pairs of an already-scheduled event, used to seed the
    /// next event's `no_repeat_teammate_from_previous_event` constraint.
    async fn get_teammate_pairs(&self, event_id: Uuid) -> PersistenceResult<Vec<(Uuid, Uuid)>>;
}
