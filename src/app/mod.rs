//! Terminal front end: home screen, game screen and the event loop that
//! drives the engine from a fixed-interval timer.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameEngine, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Playing,
}

pub struct App {
    engine: GameEngine,
    screen: Screen,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config).context("Invalid game configuration")?;

        Ok(Self {
            engine,
            screen: Screen::Home,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_event_loop(&mut terminal).await;

        // Restore the terminal even when the loop failed
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut render_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(anyhow::Error::new(err).context("Failed to read terminal event"));
                        }
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    self.on_tick();
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| match self.screen {
                        Screen::Home => self.renderer.render_home(frame, &self.stats),
                        Screen::Playing => {
                            self.renderer.render_game(frame, self.engine.state(), &self.stats)
                        }
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action);
        }
    }

    /// Apply one symbolic input to the current screen
    pub fn handle_action(&mut self, action: KeyAction) {
        match (self.screen, action) {
            (_, KeyAction::Quit) => self.should_quit = true,
            (_, KeyAction::None) => {}

            (Screen::Home, KeyAction::Confirm) => self.start_game(),
            (Screen::Home, KeyAction::Back) => self.should_quit = true,
            (Screen::Home, KeyAction::Turn(_) | KeyAction::Restart) => {}

            (Screen::Playing, KeyAction::Turn(direction)) => {
                self.engine.change_heading(direction);
            }
            (Screen::Playing, KeyAction::Restart) => self.start_game(),
            (Screen::Playing, KeyAction::Confirm) => {
                if self.engine.is_game_over() {
                    self.start_game();
                }
            }
            (Screen::Playing, KeyAction::Back) => {
                self.record_abandoned_run();
                self.screen = Screen::Home;
            }
        }
    }

    /// Forward one timer tick to the engine while a game is on screen
    pub fn on_tick(&mut self) -> TickOutcome {
        if self.screen != Screen::Playing {
            return TickOutcome::Ignored;
        }

        let outcome = self.engine.tick();
        if let TickOutcome::GameOver { final_score, .. } = outcome {
            self.stats.on_game_over(final_score);
        }
        outcome
    }

    fn start_game(&mut self) {
        self.record_abandoned_run();
        self.engine.reset();
        self.stats.on_game_start();
        self.screen = Screen::Playing;
    }

    /// A run left before it ended still counts towards the session
    fn record_abandoned_run(&mut self) {
        if self.screen == Screen::Playing && !self.engine.is_game_over() {
            self.stats.on_game_over(self.engine.score());
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
