// player port

use crate::{MembershipType, PersistenceResult, Player, PlayerStats, SkillTier};
use async_trait::async_trait;
use uuid::Uuid;

/// player-level persistence operations consumed by the core.
#[async_trait]
pub trait PlayerPort: Send + Sync {
    async fn get_player(&self, id: Uuid) -> PersistenceResult<Option<Player>>;

    /// players of a group, ordered by rating descending
    async fn list_players_by_group(&self, group_id: Uuid) -> PersistenceResult<Vec<Player>>;

    async fn add_player_to_group(
        &self,
        group_id: Uuid,
        display_name: &str,
        membership: MembershipType,
        skill_tier: Option<SkillTier>,
        initial_rating: f64,
    ) -> PersistenceResult<Player>;

    async fn update_rating_and_stats(
        &self,
        player_id: Uuid,
        rating: f64,
        stats: PlayerStats,
    ) -> PersistenceResult<()>;

    async fn reset_stats(&self, group_id: Uuid) -> PersistenceResult<()>;
}
