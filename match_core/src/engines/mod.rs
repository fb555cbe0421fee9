//! The three pluggable rating engines: Serious ELO, Catch-Up ELO, and Rac's
//! ELO. Each is a pure function over a batch of games and the players'
//! current ratings; `RatingEngine::for_system` resolves a group's configured
//! `RatingSystem` to a concrete engine with its `elo_const` default filled in.

mod base;
mod catch_up_elo;
mod racs_elo;
mod serious_elo;

pub use base::{GameForRating, PlayerRatingInput, RatingDelta};
use catch_up_elo::CatchUpElo;
use racs_elo::RacsElo;
use serious_elo::SeriousElo;

use app_core::RatingSystem;
use std::collections::HashMap;
use uuid::Uuid;

const DEFAULT_ELO_CONST_STANDARD: f64 = 400.0;
const DEFAULT_ELO_CONST_RACS: f64 = 0.3;

pub enum RatingEngine {
    SeriousElo(SeriousElo),
    CatchUp(CatchUpElo),
    RacsElo(RacsElo),
}

impl RatingEngine {
    /// resolves `elo_const` to the engine's own default when the group leaves it unset.
    pub fn for_system(system: RatingSystem, k_factor: i32, elo_const: Option<f64>) -> Self {
        let k_factor = k_factor as f64;
        match system {
            RatingSystem::SeriousElo => RatingEngine::SeriousElo(SeriousElo {
                k_factor,
                elo_const: elo_const.unwrap_or(DEFAULT_ELO_CONST_STANDARD),
            }),
            RatingSystem::CatchUp => RatingEngine::CatchUp(CatchUpElo {
                k_factor,
                elo_const: elo_const.unwrap_or(DEFAULT_ELO_CONST_STANDARD),
            }),
            RatingSystem::RacsElo => RatingEngine::RacsElo(RacsElo {
                k_factor,
                elo_const: elo_const.unwrap_or(DEFAULT_ELO_CONST_RACS),
            }),
        }
    }

    pub fn calculate_deltas(&self, games: &[GameForRating], current_ratings: &HashMap<Uuid, f64>) -> Vec<RatingDelta> {
        match self {
            RatingEngine::SeriousElo(e) => e.calculate_deltas(games, current_ratings),
            RatingEngine::CatchUp(e) => e.calculate_deltas(games, current_ratings),
            RatingEngine::RacsElo(e) => e.calculate_deltas(games, current_ratings),
        }
    }
}
