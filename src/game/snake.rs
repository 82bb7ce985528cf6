use super::entity::{Direction, EntityKind, GridEntity, Position, Tint};

/// The player's snake: an ordered chain of segment entities, head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeBody {
    segments: Vec<GridEntity>,
    direction: Direction,
    alive: bool,
}

impl SnakeBody {
    /// Create a body with a single head segment at `start`, facing left.
    /// The head carries a distinct tint from the rest of the body.
    pub fn new(start: Position) -> Self {
        let head = GridEntity::with_tint(start, EntityKind::SnakeSegment, Tint::Red);
        Self {
            segments: vec![head],
            direction: Direction::Left,
            alive: true,
        }
    }

    /// Position used for all collision queries: the head segment's cell
    pub fn head_position(&self) -> Position {
        self.segments[0].position()
    }

    pub fn length(&self) -> usize {
        self.segments.len()
    }

    /// Ordered read-only view, head first
    pub fn segments(&self) -> &[GridEntity] {
        &self.segments
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Terminal for this body; a restart builds a fresh one
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Record the direction the next `advance` will move in.
    ///
    /// Deliberately unchecked: a turn straight back into the second segment
    /// is accepted and will collide on the next `advance`.
    pub fn change_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Append a tail segment.
    ///
    /// A one-segment body grows a coincident tail that separates on the next
    /// `advance`; a longer body places the new tail one step behind the
    /// current one, against the direction of travel.
    pub fn grow(&mut self) {
        let tail = self.segments[self.segments.len() - 1].position();
        let mut segment = GridEntity::new(tail, EntityKind::SnakeSegment);
        if self.segments.len() > 1 {
            let (dx, dy) = self.direction.delta();
            segment.move_by(-dx, -dy);
        }
        self.segments.push(segment);
    }

    /// Shift the whole chain one cell: every segment from the tail up moves
    /// onto the cell its predecessor occupied, then the head moves by the
    /// current direction vector.
    pub fn advance(&mut self) {
        for i in (1..self.segments.len()).rev() {
            let ahead = self.segments[i - 1].position();
            self.segments[i].move_to(ahead);
        }
        let (dx, dy) = self.direction.delta();
        self.segments[0].move_by(dx, dy);
    }

    /// Head against every segment from index 1 on; never against itself
    pub fn collides_with_self(&self) -> bool {
        let head = self.head_position();
        self.segments[1..].iter().any(|s| s.is_at(head))
    }

    /// True if any segment, head included, occupies `position`
    pub fn occupies(&self, position: Position) -> bool {
        self.segments.iter().any(|s| s.is_at(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(snake: &SnakeBody) -> Vec<Position> {
        snake.segments().iter().map(|s| s.position()).collect()
    }

    /// Build the chain [(5,5), (6,5), (7,5)] head first, facing left
    fn three_segment_snake() -> SnakeBody {
        let mut snake = SnakeBody::new(Position::new(7, 5));
        snake.grow();
        snake.advance();
        snake.grow();
        snake.advance();
        assert_eq!(
            positions(&snake),
            vec![Position::new(5, 5), Position::new(6, 5), Position::new(7, 5)]
        );
        snake
    }

    #[test]
    fn test_new_snake() {
        let snake = SnakeBody::new(Position::new(25, 25));
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.head_position(), Position::new(25, 25));
        assert_eq!(snake.direction(), Direction::Left);
        assert!(snake.is_alive());
        assert_eq!(snake.segments()[0].tint(), Tint::Red);
    }

    #[test]
    fn test_single_segment_advance_after_turn() {
        let mut snake = SnakeBody::new(Position::new(25, 25));
        snake.change_direction(Direction::Up);
        snake.advance();
        assert_eq!(snake.head_position(), Position::new(25, 24));
        assert_eq!(snake.length(), 1);
    }

    #[test]
    fn test_chain_shifts_toward_head() {
        let mut snake = three_segment_snake();
        snake.advance();
        assert_eq!(
            positions(&snake),
            vec![Position::new(4, 5), Position::new(5, 5), Position::new(6, 5)]
        );
    }

    #[test]
    fn test_grow_then_advance_trails_old_tail() {
        let mut snake = three_segment_snake();
        let old_tail = snake.segments().last().unwrap().position();

        snake.grow();
        assert_eq!(snake.length(), 4);
        // New tail sits one step behind the old one, against travel
        assert_eq!(
            snake.segments().last().unwrap().position(),
            Position::new(8, 5)
        );

        snake.advance();
        assert_eq!(snake.segments().last().unwrap().position(), old_tail);
    }

    #[test]
    fn test_grow_on_single_segment_separates_on_advance() {
        let mut snake = SnakeBody::new(Position::new(10, 10));
        snake.grow();
        // Coincident until the next advance
        assert_eq!(
            positions(&snake),
            vec![Position::new(10, 10), Position::new(10, 10)]
        );

        snake.advance();
        assert_eq!(
            positions(&snake),
            vec![Position::new(9, 10), Position::new(10, 10)]
        );
    }

    #[test]
    fn test_self_collision_excludes_head() {
        let snake = three_segment_snake();
        assert!(!snake.collides_with_self());
    }

    #[test]
    fn test_self_collision_after_reversal() {
        // No reversal guard: turning straight back is accepted and runs the
        // head onto the second segment
        let mut snake = three_segment_snake();
        snake.change_direction(Direction::Right);
        snake.advance();
        assert_eq!(snake.head_position(), Position::new(6, 5));
        assert!(snake.collides_with_self());
    }

    #[test]
    fn test_occupies() {
        let snake = three_segment_snake();
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(7, 5)));
        assert!(!snake.occupies(Position::new(4, 5)));
    }

    #[test]
    fn test_kill_is_terminal() {
        let mut snake = SnakeBody::new(Position::new(0, 0));
        snake.kill();
        assert!(!snake.is_alive());
    }
}
