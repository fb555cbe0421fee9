// append-only audit record for one (event, player) pair

use crate::RatingSystem;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingUpdateRecord {
    pub event_id: Uuid,
    pub player_id: Uuid,
    pub rating_before: f64,
    pub rating_after: f64,
    pub delta: f64,
    pub system: RatingSystem,
}
