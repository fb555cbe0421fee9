// reported metadata of one schedule generation attempt

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintToggles {
    pub no_repeat_teammate_in_event: bool,
    pub no_repeat_teammate_from_previous_event: bool,
    pub no_repeat_opponent_in_event: bool,
}

/// seed used, configured vs. used `elo_diff`, relax iteration count, total
/// attempts, duration, and a frozen snapshot of the active constraint toggles.
/// Reported for both successful and failed generation outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub seed_used: String,
    pub elo_diff_configured: f64,
    pub elo_diff_used: f64,
    pub relax_iterations: u32,
    pub attempts: u32,
    pub duration_ms: u64,
    pub constraint_toggles: ConstraintToggles,
}
