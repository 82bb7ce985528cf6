//! Core simulation module for the snake game
//!
//! Everything here is plain state and logic: no terminal, no timers, no
//! audio. The surrounding layers drive it one tick at a time and react to
//! the events it emits.

pub mod board;
pub mod config;
pub mod entity;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use board::{Board, BoardSaturated, Bounds};
pub use config::GameConfig;
pub use entity::{Direction, EntityKind, GridEntity, Position, Tint};
pub use session::{GameEvent, GameLoop, GamePhase, GAME_OVER_MESSAGE, RESTART_HINT};
pub use snake::SnakeBody;
