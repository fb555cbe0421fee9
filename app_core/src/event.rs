// a scheduling unit within a group

use crate::GenerationMetadata;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// status lifecycle of an event: DRAFT -> GENERATED -> IN_PROGRESS -> COMPLETED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Draft,
    Generated,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name: Option<String>,
    pub starts_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    /// number of courts; every round uses exactly `courts` games
    pub courts: u32,
    /// number of rounds
    pub rounds: u32,
    pub participants: Vec<Uuid>,
    pub status: EventStatus,
    pub generation_meta: Option<GenerationMetadata>,
}

/// `|participants| == 4 * courts` is a standing invariant of a generatable event
pub fn expected_participant_count(courts: u32) -> usize {
    (courts * 4) as usize
}

impl Event {
    /// `|participants| == 4 * courts` is a standing invariant of a generatable event
    pub fn expected_participant_count(&self) -> usize {
        expected_participant_count(self.courts)
    }
}
