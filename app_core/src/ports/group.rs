// group port

use crate::{GroupSettings, PersistenceResult};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub settings: GroupSettings,
    pub archived: bool,
}

/// group-level persistence operations consumed by the core.
#[async_trait]
pub trait GroupPort: Send + Sync {
    async fn get_group(&self, id: Uuid) -> PersistenceResult<Option<Group>>;
    async fn get_settings(&self, group_id: Uuid) -> PersistenceResult<GroupSettings>;
    async fn set_archived(&self, group_id: Uuid, archived: bool) -> PersistenceResult<()>;
}
