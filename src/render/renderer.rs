use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::SessionStats;
use crate::game::{EntityKind, GameLoop, Position, Tint, GAME_OVER_MESSAGE, RESTART_HINT};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, game: &GameLoop, stats: &SessionStats) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let header = self.render_stats(chunks[0], game, stats);
        frame.render_widget(header, chunks[0]);

        // Center the playfield horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if game.is_game_over() {
            let banner = self.render_game_over(game_area, game);
            frame.render_widget(banner, game_area);
        } else {
            let grid = self.render_grid(game_area, game);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, game: &GameLoop) -> Paragraph<'_> {
        // Later inserts win, so the snake goes last and the head last of all
        let mut cells: HashMap<Position, (EntityKind, Tint)> = HashMap::new();
        for brick in game.board().border() {
            cells.insert(brick.position(), (brick.kind(), brick.tint()));
        }
        for brick in game.board().obstacles() {
            cells.insert(brick.position(), (brick.kind(), brick.tint()));
        }
        for food in game.board().food() {
            cells.insert(food.position(), (food.kind(), food.tint()));
        }
        for segment in game.snake().segments().iter().rev() {
            cells.insert(segment.position(), (segment.kind(), segment.tint()));
        }

        let bounds = game.board().bounds();
        let mut lines = Vec::new();

        for y in bounds.min_y..=bounds.max_y {
            let mut spans = Vec::new();

            for x in bounds.min_x..=bounds.max_x {
                let span = match cells.get(&Position::new(x, y)) {
                    Some(&(kind, tint)) => {
                        Span::styled(cell_glyph(kind), Style::default().fg(tint_color(tint)))
                    }
                    None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                };
                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, game: &GameLoop, stats: &SessionStats) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                game.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                stats.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                stats.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, game: &GameLoop) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                GAME_OVER_MESSAGE,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    game.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                RESTART_HINT,
                Style::default().fg(Color::Gray),
            )]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_glyph(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::SnakeSegment => "■ ",
        EntityKind::Food => "O ",
        EntityKind::Obstacle => "# ",
    }
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::White => Color::White,
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Blue => Color::Blue,
    }
}
