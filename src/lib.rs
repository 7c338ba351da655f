//! Single-player grid snake
//!
//! The game core lives in [`game`]: a synchronous [`game::GameSession`] that
//! moves the snake, detects collisions, places food and keeps score. The rest
//! of the crate is glue that drives a session from a timer and talks to a
//! browser over WebSocket.

pub mod config;
pub mod error;
pub mod game;
pub mod high_score;
pub mod protocol;
pub mod server;
pub mod state;
pub mod ws;

pub use state::AppState;
