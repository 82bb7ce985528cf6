use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::board::Bounds;
use super::entity::Position;

/// Configuration for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Playfield limits, edges inclusive
    pub bounds: Bounds,
    /// Cell the snake's head starts on
    pub start: Position,
    /// Food items spawned at game start
    pub food_count: u32,
    /// Obstacles spawned at game start
    pub obstacle_count: u32,
    /// Simulation ticks per second
    pub tick_hz: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds {
                min_x: 1,
                max_x: 58,
                min_y: 4,
                max_y: 48,
            },
            start: Position::new(25, 25),
            food_count: 50,
            obstacle_count: 50,
            tick_hz: 5,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Wall-clock interval between simulation ticks, never zero: the tick
    /// driver panics on a zero period
    pub fn tick_interval(&self) -> Duration {
        let micros = 1_000_000 / self.tick_hz.max(1);
        Duration::from_micros(micros.max(1))
    }
}
