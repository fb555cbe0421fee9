// rating update port

use crate::{PersistenceResult, RatingUpdateRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// rating-update-record persistence operations consumed by the core.
#[async_trait]
pub trait RatingUpdatePort: Send + Sync {
    async fn append_many(&self, records: Vec<RatingUpdateRecord>) -> PersistenceResult<()>;

    /// deletes every rating-update record for every event in the group;
    /// used by the Replay Orchestrator before recomputing.
    async fn delete_all_for_group(&self, group_id: Uuid) -> PersistenceResult<()>;

    /// `rating_before` of each player's most recent rating-update record in the group
    async fn last_event_rating_before(
        &self,
        group_id: Uuid,
    ) -> PersistenceResult<HashMap<Uuid, f64>>;
}
