//! Classic snake for the terminal
//!
//! The crate splits into:
//! - Simulation core (game module): entities, snake, board, tick state machine
//! - Thin collaborators around it: TUI rendering (render), keyboard mapping
//!   (input), audio cues (audio) and the tokio-driven app shell (app)

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod render;
