use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use crate::audio::{AudioSink, SoundEffect};
use crate::game::{GameConfig, GameEvent, GameLoop};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// In-memory stats for the current terminal session
pub struct SessionStats {
    pub high_score: u32,
    pub games_played: u32,
    start_time: Instant,
    elapsed: Duration,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            high_score: 0,
            games_played: 0,
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn update(&mut self) {
        self.elapsed = self.start_time.elapsed();
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn on_restart(&mut self) {
        self.start_time = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Ties the game loop to the terminal: tick timer, key events, rendering
/// and the audio sink
pub struct App<A: AudioSink> {
    game: GameLoop,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: A,
    stats: SessionStats,
    should_quit: bool,
}

impl<A: AudioSink> App<A> {
    pub fn new(config: GameConfig, audio: A) -> Result<Self> {
        let game = GameLoop::new(config).context("Failed to set up the board")?;

        Ok(Self {
            game,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            stats: SessionStats::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = tokio::time::interval(self.game.config().tick_interval());
        // Render at 30 FPS (33ms per frame)
        let mut render_timer = tokio::time::interval(Duration::from_millis(33));

        // One long-lived signal future; re-arming it per iteration could
        // drop a signal that lands between polls
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.stats.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = &mut ctrl_c => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    self.game.steer(direction);
                }
                KeyAction::Restart => {
                    if self.game.is_game_over() {
                        self.game.restart().context("Failed to rebuild the board")?;
                        self.stats.on_restart();
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        match self.game.tick().context("Failed to respawn food")? {
            Some(GameEvent::FoodCollected { .. }) => {
                self.audio.play(SoundEffect::Collect);
            }
            Some(GameEvent::SnakeDied) => {
                self.audio.play(SoundEffect::Death);
                self.stats.on_game_over(self.game.score());
            }
            None => {}
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Muted;
    use crate::game::{Bounds, Position};

    struct RecordingSink(Vec<SoundEffect>);

    impl AudioSink for RecordingSink {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

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

    #[test]
    fn test_app_initialization() {
        let app = App::new(empty_config(), Muted).unwrap();
        assert!(!app.game.is_game_over());
        assert_eq!(app.game.score(), 10);
    }

    #[test]
    fn test_death_cue_plays_exactly_once() {
        let mut app = App::new(empty_config(), RecordingSink(Vec::new())).unwrap();

        // Heading left from (5,5) on an empty board: dead at the wall, then
        // every further tick is a no-op
        for _ in 0..10 {
            app.update_game().unwrap();
        }

        assert!(app.game.is_game_over());
        assert_eq!(app.audio.0, vec![SoundEffect::Death]);
        assert_eq!(app.stats.games_played, 1);
        assert_eq!(app.stats.high_score, 10);
    }

    #[test]
    fn test_collect_cue_on_eating() {
        let mut app = App::new(empty_config(), RecordingSink(Vec::new())).unwrap();
        // Food directly in the snake's path; reach into the game to plant it
        let snake = app.game.snake().clone();
        app.game.board_mut().spawn_food(Position::new(4, 5), &snake);

        app.update_game().unwrap();
        assert_eq!(app.audio.0, vec![SoundEffect::Collect]);
    }

    #[test]
    fn test_session_stats_track_high_score() {
        let mut stats = SessionStats::new();

        stats.on_game_over(30);
        assert_eq!(stats.high_score, 30);
        assert_eq!(stats.games_played, 1);

        stats.on_game_over(20);
        assert_eq!(stats.high_score, 30);
        assert_eq!(stats.games_played, 2);
    }

    #[test]
    fn test_time_formatting() {
        let mut stats = SessionStats::new();
        stats.elapsed = Duration::from_secs(125);
        assert_eq!(stats.format_time(), "02:05");

        stats.elapsed = Duration::from_secs(0);
        assert_eq!(stats.format_time(), "00:00");
    }
}
