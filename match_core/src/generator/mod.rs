//! Constrained round-robin schedule generation: a backtracking constraint
//! solver with iterative rating-tolerance relaxation and deterministic
//! seeding. See `generate` for the entry point.

mod candidate;
mod constraints;

use app_core::{
    ConstraintToggles as MetaConstraintToggles, GenerationMetadata, GeneratorError, Team,
};
use candidate::{build_candidate_pool, CandidateMatch};
use constraints::{satisfies_hard_constraints, ConstraintToggles, PairTracker};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::hash::Hasher;
use std::time::Instant;
use uuid::Uuid;

/// per-round packing gives up after this many reshuffles of the candidate pool.
const MAX_ROUND_ATTEMPTS: u32 = 100;

#[derive(Debug, Clone)]
pub struct ParticipantRating {
    pub id: Uuid,
    pub rating: f64,
    pub display_name: String,
}

/// inputs consumed by one `generate` call.
#[derive(Debug, Clone)]
pub struct GeneratorInput {
    pub participants: Vec<ParticipantRating>,
    pub courts: u32,
    pub rounds: u32,
    pub no_repeat_teammate_in_event: bool,
    pub no_repeat_teammate_from_previous_event: bool,
    pub no_repeat_opponent_in_event: bool,
    pub elo_diff: f64,
    pub auto_relax_elo_diff: bool,
    pub auto_relax_step: f64,
    pub auto_relax_max_elo_diff: f64,
    pub previous_teammate_pairs: HashSet<(Uuid, Uuid)>,
    /// `Some(seed)` for a reproducible regenerate; `None` mints a fresh opaque seed.
    pub seed: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeneratedGame {
    pub round_index: usize,
    pub court_index: usize,
    pub team1: Team,
    pub team2: Team,
}

pub enum GenerationOutcome {
    Success {
        games: Vec<GeneratedGame>,
        metadata: GenerationMetadata,
    },
    Failure {
        error: GeneratorError,
        metadata: GenerationMetadata,
    },
}

enum FailureClass {
    Rating,
    HardConstraints,
}

/// Generate a complete `rounds x courts` schedule for `input`.
///
/// Deterministic: identical inputs (including seed) yield identical output.
/// Distinct seeds should almost always yield distinct schedules.
pub fn generate(input: GeneratorInput) -> GenerationOutcome {
    let expected = (input.courts * 4) as usize;
    if input.participants.len() != expected {
        let metadata = empty_metadata(&input, "unvalidated".to_string(), 0);
        return GenerationOutcome::Failure {
            error: GeneratorError::InputInvalid {
                expected,
                actual: input.participants.len(),
                courts: input.courts,
            },
            metadata,
        };
    }

    let seed_used = input.seed.clone().unwrap_or_else(fresh_seed);
    let toggles = ConstraintToggles {
        no_repeat_teammate_in_event: input.no_repeat_teammate_in_event,
        no_repeat_teammate_from_previous_event: input.no_repeat_teammate_from_previous_event,
        no_repeat_opponent_in_event: input.no_repeat_opponent_in_event,
    };

    let start = Instant::now();
    let mut attempts: u32 = 0;
    let mut relax_iterations: u32 = 0;
    let mut elo_diff_used = input.elo_diff;

    loop {
        let mut rng = seeded_rng(&seed_used, relax_iterations);
        let pool = build_candidate_pool(&input.participants, elo_diff_used);
        attempts += 1;

        let outcome = if pool.is_empty() {
            Err(FailureClass::Rating)
        } else {
            try_generate(&input, &pool, &toggles, &mut rng)
        };

        match outcome {
            Ok(games) => {
                let metadata = metadata_for(&input, seed_used, elo_diff_used, relax_iterations, attempts, start);
                return GenerationOutcome::Success { games, metadata };
            }
            Err(FailureClass::Rating) if input.auto_relax_elo_diff => {
                elo_diff_used += input.auto_relax_step;
                relax_iterations += 1;
                if elo_diff_used > input.auto_relax_max_elo_diff {
                    let metadata =
                        metadata_for(&input, seed_used, elo_diff_used, relax_iterations, attempts, start);
                    return GenerationOutcome::Failure {
                        error: GeneratorError::RatingInfeasible {
                            max_elo_diff: input.auto_relax_max_elo_diff,
                        },
                        metadata,
                    };
                }
                log::debug!(
                    "schedule generation: relaxing elo_diff to {elo_diff_used} (iteration {relax_iterations})"
                );
            }
            Err(FailureClass::Rating) => {
                let metadata = metadata_for(&input, seed_used, elo_diff_used, relax_iterations, attempts, start);
                return GenerationOutcome::Failure {
                    error: GeneratorError::RatingInfeasible {
                        max_elo_diff: elo_diff_used,
                    },
                    metadata,
                };
            }
            Err(FailureClass::HardConstraints) => {
                let metadata = metadata_for(&input, seed_used, elo_diff_used, relax_iterations, attempts, start);
                return GenerationOutcome::Failure {
                    error: GeneratorError::ConstraintsInfeasible,
                    metadata,
                };
            }
        }
    }
}

/// pack every round of the event from the candidate pool; relaxing elo_diff
/// is the caller's job, this only distinguishes pool-empty (already handled
/// by the caller) from a round that cannot be filled.
fn try_generate(
    input: &GeneratorInput,
    pool: &[CandidateMatch],
    toggles: &ConstraintToggles,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<GeneratedGame>, FailureClass> {
    let mut games = Vec::new();
    let mut event_tracker = PairTracker::default();

    for round_index in 0..input.rounds as usize {
        let round_games = select_round(
            round_index,
            input.courts as usize,
            pool,
            toggles,
            &input.previous_teammate_pairs,
            &event_tracker,
            rng,
        )
        .ok_or(FailureClass::HardConstraints)?;

        for g in &round_games {
            let m = CandidateMatch {
                team1: g.team1,
                team2: g.team2,
            };
            event_tracker.record(&m);
        }
        games.extend(round_games);
    }

    Ok(games)
}

fn select_round(
    round_index: usize,
    courts: usize,
    pool: &[CandidateMatch],
    toggles: &ConstraintToggles,
    previous_event_pairs: &HashSet<(Uuid, Uuid)>,
    event_tracker: &PairTracker,
    rng: &mut ChaCha8Rng,
) -> Option<Vec<GeneratedGame>> {
    let mut shuffled = pool.to_vec();

    for _ in 0..MAX_ROUND_ATTEMPTS {
        shuffled.shuffle(rng);

        let mut selected: Vec<GeneratedGame> = Vec::with_capacity(courts);
        let mut used_players: HashSet<Uuid> = HashSet::new();
        let mut round_tracker = PairTracker::default();

        for m in &shuffled {
            let players = [m.team1.0, m.team1.1, m.team2.0, m.team2.1];
            if players.iter().any(|p| used_players.contains(p)) {
                continue;
            }
            if !satisfies_hard_constraints(m, toggles, previous_event_pairs, event_tracker, &round_tracker) {
                continue;
            }

            selected.push(GeneratedGame {
                round_index,
                court_index: selected.len(),
                team1: m.team1,
                team2: m.team2,
            });
            used_players.extend(players);
            round_tracker.record(m);

            if selected.len() == courts {
                return Some(selected);
            }
        }
    }

    None
}

fn seeded_rng(seed: &str, relax_iteration: u32) -> ChaCha8Rng {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    hasher.write(seed.as_bytes());
    hasher.write_u32(relax_iteration);
    ChaCha8Rng::seed_from_u64(hasher.finish())
}

fn fresh_seed() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

fn metadata_for(
    input: &GeneratorInput,
    seed_used: String,
    elo_diff_used: f64,
    relax_iterations: u32,
    attempts: u32,
    start: Instant,
) -> GenerationMetadata {
    GenerationMetadata {
        seed_used,
        elo_diff_configured: input.elo_diff,
        elo_diff_used,
        relax_iterations,
        attempts,
        duration_ms: start.elapsed().as_millis() as u64,
        constraint_toggles: MetaConstraintToggles {
            no_repeat_teammate_in_event: input.no_repeat_teammate_in_event,
            no_repeat_teammate_from_previous_event: input.no_repeat_teammate_from_previous_event,
            no_repeat_opponent_in_event: input.no_repeat_opponent_in_event,
        },
    }
}

fn empty_metadata(input: &GeneratorInput, seed_used: String, attempts: u32) -> GenerationMetadata {
    GenerationMetadata {
        seed_used,
        elo_diff_configured: input.elo_diff,
        elo_diff_used: input.elo_diff,
        relax_iterations: 0,
        attempts,
        duration_ms: 0,
        constraint_toggles: MetaConstraintToggles {
            no_repeat_teammate_in_event: input.no_repeat_teammate_in_event,
            no_repeat_teammate_from_previous_event: input.no_repeat_teammate_from_previous_event,
            no_repeat_opponent_in_event: input.no_repeat_opponent_in_event,
        },
    }
}
