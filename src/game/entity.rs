use serde::{Deserialize, Serialize};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// What kind of thing an entity on the board is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    SnakeSegment,
    Food,
    Obstacle,
}

impl EntityKind {
    fn default_tint(&self) -> Tint {
        match self {
            EntityKind::SnakeSegment => Tint::White,
            EntityKind::Food => Tint::Green,
            EntityKind::Obstacle => Tint::Blue,
        }
    }
}

/// Logical color the render layer should use for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    White,
    Red,
    Green,
    Blue,
}

/// A positioned object on the grid
///
/// Moves are unconditional; callers are responsible for checking bounds and
/// occupancy before moving an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEntity {
    position: Position,
    kind: EntityKind,
    tint: Tint,
    removed: bool,
}

impl GridEntity {
    pub fn new(position: Position, kind: EntityKind) -> Self {
        Self::with_tint(position, kind, kind.default_tint())
    }

    pub fn with_tint(position: Position, kind: EntityKind, tint: Tint) -> Self {
        Self {
            position,
            kind,
            tint,
            removed: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn is_at(&self, position: Position) -> bool {
        self.position == position
    }

    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position.moved_by(dx, dy);
    }

    /// Mark the entity inert; the owning collection drops it afterwards.
    /// Idempotent.
    pub fn remove(&mut self) {
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}
