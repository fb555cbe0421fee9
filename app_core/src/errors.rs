//! error taxonomy shared by the core's components.

use crate::utils::validation::{FieldError, ValidationErrors};
use thiserror::Error;

/// errors surfaced by a `PersistencePort` implementation.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("entity not found")]
    NotFound,

    #[error("optimistic lock conflict")]
    OptimisticLockConflict,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// structured failure of the Schedule Generator, carrying enough context
/// to distinguish a rating-bound failure from a hard-constraint-bound one.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// bounded relaxation exhausted without finding a balanced schedule
    #[error("could not generate schedule within rating constraints (max elo diff {max_elo_diff} exceeded)")]
    RatingInfeasible { max_elo_diff: f64 },

    /// hard teammate/opponent toggles cannot be satisfied; relaxing elo_diff will not help
    #[error("could not generate schedule: hard constraints (teammate/opponent rules) cannot be satisfied")]
    ConstraintsInfeasible,

    /// `|participants| != courts * 4`
    #[error("expected {expected} participants for {courts} courts, got {actual}")]
    InputInvalid {
        expected: usize,
        actual: usize,
        courts: u32,
    },
}

/// top-level error taxonomy of the core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// propagated from the persistence port
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// the Schedule Generator exhausted its budget
    #[error("matchmaking error: {0}")]
    Generator(#[from] GeneratorError),

    /// generic validation error of one field of an entity
    #[error("field validation error: {0}")]
    Field(#[from] FieldError),

    /// generic collected validation errors
    #[error("validation error: {0:?}")]
    Validation(#[from] ValidationErrors),

    /// caller referenced an id that does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// operation illegal for the entity's current status
    #[error("operation not legal for current state: {0}")]
    StateViolation(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn is_matchmaking_failure(&self) -> bool {
        matches!(self, CoreError::Generator(_))
    }
}
