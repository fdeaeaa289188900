//! Elves and goblins fighting it out on a grid, one
//! deterministic round at a time.

pub mod game;
pub mod geometry;
pub mod map;
pub mod scenario;
pub mod sprite;

pub use self::game::search::{AttackSearch, SearchError, Trial, ATTACK_RANGE};
pub use self::game::{Game, GameOutcome, RoundError};
pub use self::scenario::Scenario;
