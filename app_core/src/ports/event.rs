// event port

use crate::{Event, EventStatus, GenerationMetadata, PersistenceResult};
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

/// event-level persistence operations consumed by the core.
#[async_trait]
pub trait EventPort: Send + Sync {
    async fn get_event(&self, id: Uuid) -> PersistenceResult<Option<Event>>;

    async fn create_event(
        &self,
        group_id: Uuid,
        name: Option<String>,
        starts_at: Option<OffsetDateTime>,
        courts: u32,
        rounds: u32,
        participants: Vec<Uuid>,
    ) -> PersistenceResult<Event>;

    async fn update_status(
        &self,
        event_id: Uuid,
        status: EventStatus,
        generation_meta: Option<GenerationMetadata>,
    ) -> PersistenceResult<()>;

    async fn delete_event(&self, event_id: Uuid) -> PersistenceResult<()>;

    /// events of a group, optionally filtered by status
    async fn list_events_by_group(
        &self,
        group_id: Uuid,
        status: Option<EventStatus>,
    ) -> PersistenceResult<Vec<Event>>;

    /// events of a group in `(starts_at, created_at)` ascending order,
    /// restricted to `COMPLETED` status; used by the Replay Orchestrator.
    async fn list_completed_events_chronological(
        &self,
        group_id: Uuid,
    ) -> PersistenceResult<Vec<Event>>;

    /// most recent `COMPLETED` event in the group preceding `before_event_id`
    async fn get_previous_completed_event(
        &self,
        group_id: Uuid,
        before_event_id: Uuid,
    ) -> PersistenceResult<Option<Event>>;

    async fn get_participants(&self, event_id: Uuid) -> PersistenceResult<Vec<Uuid>>;
    async fn add_participants(&self, event_id: Uuid, player_ids: &[Uuid]) -> PersistenceResult<()>;
}
