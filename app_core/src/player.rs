// roster member within a group

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// membership classification of a player within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipType {
    Permanent,
    Sub,
}

/// skill tier of a sub, used to offset the initial rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillTier {
    Advanced,
    Intermediate,
    Beginner,
}

impl SkillTier {
    /// offset applied to `initial_rating`, scaled by `initial_rating / 1000`.
    /// matches the source system's `int(100 * offset_multiplier)` truncation.
    pub fn rating_offset(self, initial_rating: i32) -> i32 {
        let offset_multiplier = initial_rating as f64 / 1000.0;
        match self {
            SkillTier::Advanced => (100.0 * offset_multiplier) as i32,
            SkillTier::Intermediate => 0,
            SkillTier::Beginner => -((100.0 * offset_multiplier) as i32),
        }
    }
}

/// cumulative match stats of a player within a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl PlayerStats {
    pub fn record(&mut self, outcome: MatchOutcome) {
        self.games_played += 1;
        match outcome {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Loss => self.losses += 1,
            MatchOutcome::Tie => self.ties += 1,
        }
    }
}

/// per-player outcome of a single game, from that player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win,
    Loss,
    Tie,
}

/// a roster member within a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub display_name: String,
    pub rating: f64,
    pub stats: PlayerStats,
    pub membership: MembershipType,
    pub skill_tier: Option<SkillTier>,
}

impl Player {
    /// rating a player is created with, from the group's `initial_rating`
    /// adjusted by skill tier (see GroupSettings).
    pub fn starting_rating(membership: MembershipType, skill_tier: Option<SkillTier>, initial_rating: i32) -> f64 {
        let offset = match (membership, skill_tier) {
            (MembershipType::Sub, Some(tier)) => tier.rating_offset(initial_rating),
            _ => 0,
        };
        (initial_rating + offset) as f64
    }
}
