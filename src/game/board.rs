use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{EntityKind, GridEntity, Position};
use super::snake::SnakeBody;

/// Upper bound on resampling when placing an entity at random. The designed
/// occupancy (~100 entities on thousands of cells) never gets close.
const MAX_PLACEMENT_ATTEMPTS: u32 = 1_000;

/// Inclusive playfield limits; the edge coordinates themselves are the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    /// True when the position sits on any of the four boundary edges
    pub fn on_edge(&self, position: Position) -> bool {
        position.x == self.min_x
            || position.x == self.max_x
            || position.y == self.min_y
            || position.y == self.max_y
    }
}

/// No free cell found within the placement attempt bound
#[derive(Debug, Error)]
#[error("no free cell found after {attempts} attempts; the board is saturated")]
pub struct BoardSaturated {
    pub attempts: u32,
}

/// Owns the food and obstacle entities and answers every collision query
pub struct Board {
    bounds: Bounds,
    food: Vec<GridEntity>,
    obstacles: Vec<GridEntity>,
    border: Vec<GridEntity>,
}

impl Board {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            food: Vec::new(),
            obstacles: Vec::new(),
            border: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn food(&self) -> &[GridEntity] {
        &self.food
    }

    pub fn obstacles(&self) -> &[GridEntity] {
        &self.obstacles
    }

    /// Border bricks are drawn but never consulted for collision; boundary
    /// collision is the coordinate check in [`Bounds::on_edge`].
    pub fn border(&self) -> &[GridEntity] {
        &self.border
    }

    /// A position uniformly sampled from the interior (border ring excluded)
    /// that collides with no food, obstacle or snake segment
    pub fn random_free_position(
        &self,
        rng: &mut impl Rng,
        snake: &SnakeBody,
    ) -> Result<Position, BoardSaturated> {
        // Degenerate bounds leave no interior cell to sample; bail out
        // before gen_range panics on an empty range
        if self.bounds.min_x + 1 >= self.bounds.max_x || self.bounds.min_y + 1 >= self.bounds.max_y
        {
            return Err(BoardSaturated { attempts: 0 });
        }

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = rng.gen_range(self.bounds.min_x + 1..self.bounds.max_x);
            let y = rng.gen_range(self.bounds.min_y + 1..self.bounds.max_y);
            let position = Position::new(x, y);
            if self.is_free(position, snake) {
                return Ok(position);
            }
        }
        Err(BoardSaturated {
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    /// Free of every tracked entity: food, obstacles and the snake itself
    pub fn is_free(&self, position: Position, snake: &SnakeBody) -> bool {
        !self.is_food_at(position) && !self.is_obstacle_at(position) && !snake.occupies(position)
    }

    /// Insert food only if the cell is free; silent no-op otherwise
    pub fn spawn_food(&mut self, position: Position, snake: &SnakeBody) {
        if self.is_free(position, snake) {
            self.food.push(GridEntity::new(position, EntityKind::Food));
        }
    }

    /// Insert an obstacle only if the cell is free; silent no-op otherwise
    pub fn spawn_obstacle(&mut self, position: Position, snake: &SnakeBody) {
        if self.is_free(position, snake) {
            self.obstacles
                .push(GridEntity::new(position, EntityKind::Obstacle));
        }
    }

    /// Lay obstacle bricks along the four boundary edges, for rendering only
    pub fn build_border(&mut self) {
        for x in self.bounds.min_x..=self.bounds.max_x {
            self.border
                .push(GridEntity::new(Position::new(x, self.bounds.min_y), EntityKind::Obstacle));
            self.border
                .push(GridEntity::new(Position::new(x, self.bounds.max_y), EntityKind::Obstacle));
        }
        for y in self.bounds.min_y + 1..self.bounds.max_y {
            self.border
                .push(GridEntity::new(Position::new(self.bounds.min_x, y), EntityKind::Obstacle));
            self.border
                .push(GridEntity::new(Position::new(self.bounds.max_x, y), EntityKind::Obstacle));
        }
    }

    pub fn is_food_at(&self, position: Position) -> bool {
        self.food.iter().any(|f| f.is_at(position))
    }

    pub fn is_obstacle_at(&self, position: Position) -> bool {
        self.obstacles.iter().any(|o| o.is_at(position))
    }

    pub fn hits_boundary(&self, position: Position) -> bool {
        self.bounds.on_edge(position)
    }

    /// Remove and return the food item at `position`, if any. The caller is
    /// responsible for spawning a replacement.
    pub fn consume_food_at(&mut self, position: Position) -> Option<GridEntity> {
        let index = self.food.iter().position(|f| f.is_at(position))?;
        let mut food = self.food.remove(index);
        food.remove();
        Some(food)
    }

    /// Score is derived from snake length, never stored
    pub fn score(&self, snake_length: usize) -> u32 {
        snake_length as u32 * 10
    }
}
