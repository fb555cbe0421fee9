// per-group configuration consumed by the core

use serde::{Deserialize, Serialize};

/// which rating engine a group uses to turn scored games into deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingSystem {
    SeriousElo,
    CatchUp,
    RacsElo,
}

/// rating-tolerance policy and constraint toggles consumed by the Schedule Generator,
/// plus the rating-engine parameters consumed by the Rating Engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSettings {
    pub rating_system: RatingSystem,
    /// baseline rating new players start from; skill-tier offsets scale with this
    pub initial_rating: i32,
    pub k_factor: i32,
    /// divisor in the expected-score formula; `None` resolves to the engine's
    /// own default (400.0 for Serious/Catch-Up, 0.3 for Rac's)
    pub elo_const: Option<f64>,

    pub no_repeat_teammate_in_event: bool,
    pub no_repeat_teammate_from_previous_event: bool,
    pub no_repeat_opponent_in_event: bool,

    /// fractional rating-imbalance tolerance, e.g. 0.05
    pub elo_diff: f64,
    pub auto_relax_elo_diff: bool,
    pub auto_relax_step: f64,
    pub auto_relax_max_elo_diff: f64,
}

impl Default for GroupSettings {
    fn default() -> Self {
        GroupSettings {
            rating_system: RatingSystem::SeriousElo,
            initial_rating: 1000,
            k_factor: 32,
            elo_const: None,
            no_repeat_teammate_in_event: true,
            no_repeat_teammate_from_previous_event: true,
            no_repeat_opponent_in_event: true,
            elo_diff: 0.05,
            auto_relax_elo_diff: true,
            auto_relax_step: 0.01,
            auto_relax_max_elo_diff: 0.25,
        }
    }
}
