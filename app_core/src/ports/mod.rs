// trait definitions for the persistence port

mod event;
mod game;
mod group;
mod player;
mod rating_update;

pub use event::*;
pub use game::*;
pub use group::*;
pub use player::*;
pub use rating_update::*;

/// the single port the core requires from its caller: a persistence adapter
/// supplying group, player, event, game, and rating-update operations.
/// Adapters must reject invalid column writes (a whitelist for the
/// updatable event columns is required of any implementation).
pub trait PersistencePort: GroupPort + PlayerPort + EventPort + GamePort + RatingUpdatePort {}

impl<T: GroupPort + PlayerPort + EventPort + GamePort + RatingUpdatePort> PersistencePort for T {}
