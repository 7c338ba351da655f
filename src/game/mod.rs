//! Game module

pub mod collision;
pub mod direction;
pub mod food;
pub mod game_loop;
pub mod location;
pub mod scoring;
pub mod session;
pub mod snake;

pub use direction::Direction;
pub use location::{Grid, Location};
pub use session::{EndCause, GamePhase, GameSession, GameSnapshot, TickOutcome};
pub use snake::Snake;
