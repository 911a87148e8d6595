use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{GameOverCause, GameState, Position};
use crate::metrics::SessionStats;

const GAME_OVER_WIDTH: u16 = 36;
const GAME_OVER_HEIGHT: u16 = 9;

#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Title and the Play button
    pub fn render_home(&self, frame: &mut Frame, stats: &SessionStats) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(3), // Title
                Constraint::Length(2),
                Constraint::Length(3), // Play button
                Constraint::Length(2), // Best score
                Constraint::Min(0),
                Constraint::Length(1), // Hint
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "eat, grow, don't bite yourself",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let button_area = centered_rect(16, 3, chunks[3]);
        let button = Paragraph::new(Line::from(Span::styled(
            "▶ Play",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(button, button_area);

        if stats.games_played > 0 {
            let best = Paragraph::new(Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(stats.best_score.to_string(), Style::default().fg(Color::White)),
            ]))
            .alignment(Alignment::Center);
            frame.render_widget(best, chunks[4]);
        }

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" to play | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[6]);
    }

    /// Score line, board and controls, plus the game-over dialog once the
    /// game has ended
    pub fn render_game(&self, frame: &mut Frame, state: &GameState, stats: &SessionStats) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, stats), chunks[0]);

        let game_area = chunks[1];
        frame.render_widget(self.render_grid(state), game_area);

        if let Some(cause) = state.game_over_cause() {
            let popup = centered_rect(GAME_OVER_WIDTH, GAME_OVER_HEIGHT, game_area);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(cause, state.score), popup);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.contains(pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if state.food == Some(pos) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, stats: &SessionStats) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                stats.best_score.max(state.score).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_game_over(&self, cause: GameOverCause, score: u32) -> Paragraph<'_> {
        let headline = match cause {
            GameOverCause::BoardFilled => Span::styled(
                "Board cleared!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            GameOverCause::Wall | GameOverCause::SelfCollision => Span::styled(
                "Game Over",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        };

        let text = vec![
            Line::from(""),
            Line::from(headline),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" restart  ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Esc",
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" home", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Blue)),
            Span::raw(" home | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn sample_state() -> GameState {
        let snake = Snake::from_cells([Position::new(1, 1), Position::new(2, 1)]).unwrap();
        GameState::new(snake, Direction::Right, Some(Position::new(4, 3)), 6, 5)
    }

    #[test]
    fn test_home_screen_shows_play_button() {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render_home(frame, &SessionStats::new()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Play"));
        assert!(!text.contains("Best"));
    }

    #[test]
    fn test_game_screen_shows_score_and_board() {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let mut state = sample_state();
        state.score = 7;

        terminal
            .draw(|frame| Renderer::new().render_game(frame, &state, &SessionStats::new()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 7"));
        assert!(text.contains('●'));
        assert!(!text.contains("Game Over"));
    }

    #[test]
    fn test_game_over_dialog() {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let mut state = sample_state();
        state.status = crate::game::GameStatus::GameOver(GameOverCause::Wall);

        terminal
            .draw(|frame| Renderer::new().render_game(frame, &state, &SessionStats::new()))
            .unwrap();

        assert!(screen_text(&terminal).contains("Game Over"));
    }

    #[test]
    fn test_centered_rect_clips_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered_rect(6, 2, area), Rect::new(2, 1, 6, 2));
        assert_eq!(centered_rect(40, 40, area), area);
    }
}
