//! Core game rules for Snake
//!
//! Nothing in here performs I/O or knows how the game is drawn. A
//! presentation layer drives `GameEngine::tick` from a fixed-interval timer,
//! forwards direction changes and reads the resulting `GameState`.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod state;

pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use state::{GameOverCause, GameState, GameStatus, Position, Snake};
