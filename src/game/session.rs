use rand::rngs::ThreadRng;
use tracing::{debug, info};

use super::board::{Board, BoardSaturated};
use super::config::GameConfig;
use super::entity::Direction;
use super::snake::SnakeBody;

/// Banner text shown when the snake dies
pub const GAME_OVER_MESSAGE: &str = "Game Over";
pub const RESTART_HINT: &str = "Press 'r' to play again";

/// Phase of the tick-driven state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// Something a tick produced that collaborators may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Food was eaten; carries the score after growing
    FoodCollected { score: u32 },
    /// The snake hit the boundary, a brick or itself
    SnakeDied,
}

/// Owns the snake and board for one game and drives them one tick at a time.
/// A restart rebuilds both wholesale from the stored configuration.
pub struct GameLoop {
    config: GameConfig,
    snake: SnakeBody,
    board: Board,
    phase: GamePhase,
    pending_direction: Option<Direction>,
    rng: ThreadRng,
}

impl GameLoop {
    pub fn new(config: GameConfig) -> Result<Self, BoardSaturated> {
        let mut rng = rand::thread_rng();
        let (snake, board) = Self::build_world(&config, &mut rng)?;
        info!(
            food = config.food_count,
            obstacles = config.obstacle_count,
            "game started"
        );
        Ok(Self {
            config,
            snake,
            board,
            phase: GamePhase::Running,
            pending_direction: None,
            rng,
        })
    }

    fn build_world(
        config: &GameConfig,
        rng: &mut ThreadRng,
    ) -> Result<(SnakeBody, Board), BoardSaturated> {
        let snake = SnakeBody::new(config.start);
        let mut board = Board::new(config.bounds);

        for _ in 0..config.food_count {
            let position = board.random_free_position(rng, &snake)?;
            board.spawn_food(position, &snake);
        }
        for _ in 0..config.obstacle_count {
            let position = board.random_free_position(rng, &snake)?;
            board.spawn_obstacle(position, &snake);
        }
        board.build_border();

        Ok((snake, board))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.board.score(self.snake.length())
    }

    /// Record a direction for the next tick; the latest keypress wins
    pub fn steer(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Run one simulation step. Ticks delivered after game over are no-ops.
    ///
    /// Order within a tick is fixed: pending input is applied, the snake
    /// advances, then the post-move head is checked for food first and the
    /// death conditions second, so eating and dying never both register.
    pub fn tick(&mut self) -> Result<Option<GameEvent>, BoardSaturated> {
        if self.phase == GamePhase::GameOver {
            return Ok(None);
        }

        if let Some(direction) = self.pending_direction.take() {
            self.snake.change_direction(direction);
        }

        self.snake.advance();
        let head = self.snake.head_position();

        if self.board.is_food_at(head) {
            self.board.consume_food_at(head);
            self.snake.grow();
            let replacement = self.board.random_free_position(&mut self.rng, &self.snake)?;
            self.board.spawn_food(replacement, &self.snake);

            let score = self.score();
            debug!(score, length = self.snake.length(), "food collected");
            return Ok(Some(GameEvent::FoodCollected { score }));
        }

        if self.board.hits_boundary(head)
            || self.board.is_obstacle_at(head)
            || self.snake.collides_with_self()
        {
            self.snake.kill();
            self.phase = GamePhase::GameOver;
            info!(score = self.score(), length = self.snake.length(), "snake died");
            return Ok(Some(GameEvent::SnakeDied));
        }

        Ok(None)
    }

    /// Discard the dead snake and board and rebuild both from the initial
    /// configuration. Ignored while the game is still running.
    pub fn restart(&mut self) -> Result<(), BoardSaturated> {
        if self.phase != GamePhase::GameOver {
            return Ok(());
        }

        let (snake, board) = Self::build_world(&self.config, &mut self.rng)?;
        self.snake = snake;
        self.board = board;
        self.phase = GamePhase::Running;
        self.pending_direction = None;
        info!("game restarted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Bounds;
    use crate::game::entity::Position;

    /// Empty 11x11 board, snake in the middle, nothing pre-spawned
    fn empty_config() -> GameConfig {
        GameConfig {
            bounds: Bounds {
                min_x: 0,
                max_x: 10,
                min_y: 0,
                max_y: 10,
            },
            start: Position::new(5, 5),
            food_count: 0,
            obstacle_count: 0,
            tick_hz: 5,
        }
    }

    fn drive_until_game_over(game: &mut GameLoop) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..50 {
            if let Some(event) = game.tick().unwrap() {
                events.push(event);
            }
            if game.is_game_over() {
                break;
            }
        }
        assert!(game.is_game_over());
        events
    }

    #[test]
    fn test_initial_state() {
        let game = GameLoop::new(empty_config()).unwrap();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().head_position(), Position::new(5, 5));
    }

    #[test]
    fn test_prespawn_counts() {
        let config = GameConfig {
            food_count: 5,
            obstacle_count: 3,
            ..empty_config()
        };
        let game = GameLoop::new(config).unwrap();
        assert_eq!(game.board().food().len(), 5);
        assert_eq!(game.board().obstacles().len(), 3);
        assert!(!game.board().border().is_empty());
    }

    #[test]
    fn test_length_constant_without_food() {
        let mut game = GameLoop::new(empty_config()).unwrap();
        let length = game.snake().length();
        game.tick().unwrap();
        assert_eq!(game.snake().length(), length);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut game = GameLoop::new(empty_config()).unwrap();
        // Food directly in the snake's path
        game.board.spawn_food(Position::new(4, 5), &game.snake);

        let event = game.tick().unwrap();
        assert_eq!(event, Some(GameEvent::FoodCollected { score: 20 }));
        assert_eq!(game.snake().length(), 2);
        assert_eq!(game.score(), 20);
        assert_eq!(game.phase(), GamePhase::Running);

        // Consumed and replaced by one new item elsewhere
        assert!(!game.board().is_food_at(Position::new(4, 5)));
        assert_eq!(game.board().food().len(), 1);
    }

    #[test]
    fn test_boundary_death_emits_once() {
        let mut game = GameLoop::new(empty_config()).unwrap();
        // Heading left from (5,5) with nothing in the way: the wall at x=0
        let events = drive_until_game_over(&mut game);

        assert_eq!(events, vec![GameEvent::SnakeDied]);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(!game.snake().is_alive());
        assert_eq!(game.snake().head_position(), Position::new(0, 5));
    }

    #[test]
    fn test_obstacle_death() {
        let mut game = GameLoop::new(empty_config()).unwrap();
        game.board.spawn_obstacle(Position::new(4, 5), &game.snake);

        let event = game.tick().unwrap();
        assert_eq!(event, Some(GameEvent::SnakeDied));
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_food_takes_precedence_over_death() {
        // Food one step short of the wall: the eating tick must not also
        // check the death conditions
        let mut game = GameLoop::new(empty_config()).unwrap();
        game.board.spawn_obstacle(Position::new(3, 5), &game.snake);
        game.board.spawn_food(Position::new(4, 5), &game.snake);

        let event = game.tick().unwrap();
        assert!(matches!(event, Some(GameEvent::FoodCollected { .. })));
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_ticks_after_game_over_are_noops() {
        let mut game = GameLoop::new(empty_config()).unwrap();
        drive_until_game_over(&mut game);
        let head = game.snake().head_position();

        assert_eq!(game.tick().unwrap(), None);
        assert_eq!(game.snake().head_position(), head);
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_latest_steer_wins() {
        let mut game = GameLoop::new(empty_config()).unwrap();
        game.steer(Direction::Up);
        game.steer(Direction::Down);
        game.tick().unwrap();
        assert_eq!(game.snake().head_position(), Position::new(5, 6));
    }

    #[test]
    fn test_steer_applies_before_movement() {
        let mut game = GameLoop::new(empty_config()).unwrap();
        game.steer(Direction::Up);
        game.tick().unwrap();
        assert_eq!(game.snake().head_position(), Position::new(5, 4));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = GameLoop::new(empty_config()).unwrap();
        game.board.spawn_food(Position::new(4, 5), &game.snake);
        game.tick().unwrap();
        assert_eq!(game.score(), 20);

        drive_until_game_over(&mut game);
        assert!(game.is_game_over());

        game.restart().unwrap();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().head_position(), Position::new(5, 5));
        assert!(game.snake().is_alive());
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut game = GameLoop::new(empty_config()).unwrap();
        game.tick().unwrap();
        let head = game.snake().head_position();

        game.restart().unwrap();
        assert_eq!(game.snake().head_position(), head);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_saturated_config_fails_fast() {
        let config = GameConfig {
            bounds: Bounds {
                min_x: 0,
                max_x: 2,
                min_y: 0,
                max_y: 2,
            },
            start: Position::new(1, 1),
            food_count: 1,
            obstacle_count: 0,
            tick_hz: 5,
        };
        assert!(GameLoop::new(config).is_err());
    }
}
