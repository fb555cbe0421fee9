// contains core functionality

pub mod engines;
pub mod generator;
pub mod lifecycle;
pub mod replay;
mod stats;

pub use engines::RatingEngine;
pub use generator::{GeneratedGame, GenerationOutcome, GeneratorInput, ParticipantRating};
pub use lifecycle::{CompleteResponse, LifecycleController};
pub use replay::{RecalculateSummary, ReplayOrchestrator, TopRating};
