use anyhow::{Result, ensure};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    config::GameConfig,
    direction::Direction,
    food::place_food,
    state::{GameOverCause, GameState, GameStatus, Position, Snake},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was already over; nothing changed
    Ignored,
    /// The snake moved without growing
    Moved,
    /// The snake ate and grew; `score` is the new score
    Ate { score: u32 },
    /// The game just ended
    GameOver {
        cause: GameOverCause,
        final_score: u32,
    },
}

impl TickOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, TickOutcome::GameOver { .. })
    }
}

/// Owns the game state and every rule that mutates it
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new engine and start a game
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let rng = rng_for(&config);
        let state = GameState::new(
            Snake::new(config.start),
            Direction::Right,
            None,
            config.grid_width,
            config.grid_height,
        );

        let mut engine = Self { config, state, rng };
        engine.reset();
        Ok(engine)
    }

    /// Create an engine that continues from an explicit state without
    /// starting a new game
    pub fn with_state(config: GameConfig, state: GameState) -> Result<Self> {
        config.validate()?;
        ensure!(
            state.grid_width == config.grid_width && state.grid_height == config.grid_height,
            "state grid {}x{} does not match config grid {}x{}",
            state.grid_width,
            state.grid_height,
            config.grid_width,
            config.grid_height
        );
        ensure!(
            state.snake.iter().all(|cell| state.is_in_bounds(cell)),
            "snake leaves the grid"
        );
        match state.food {
            Some(food) => {
                ensure!(state.is_in_bounds(food), "food is outside the grid");
                ensure!(!state.snake.contains(food), "food sits on the snake");
            }
            None => ensure!(state.is_game_over(), "a running game needs food on the grid"),
        }

        let rng = rng_for(&config);
        Ok(Self { config, state, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.state.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.state.food
    }

    pub fn heading(&self) -> Direction {
        self.state.heading
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Put every entity back to its start-of-game value
    pub fn reset(&mut self) {
        self.state = GameState::new(
            Snake::new(self.config.start),
            Direction::Right,
            None,
            self.config.grid_width,
            self.config.grid_height,
        );
        self.state.food = match self.config.initial_food {
            Some(food) if food != self.config.start => Some(food),
            _ => self.spawn_food(),
        };
        if self.state.food.is_none() {
            self.state.status = GameStatus::GameOver(GameOverCause::BoardFilled);
        }

        info!(
            "new game on a {}x{} grid",
            self.config.grid_width, self.config.grid_height
        );
    }

    /// Request a new heading. Returns whether it was accepted.
    ///
    /// The exact opposite of the current heading is refused. The last
    /// accepted request before a tick wins.
    pub fn change_heading(&mut self, requested: Direction) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        if requested.is_opposite(self.state.heading) {
            debug!("ignoring reversal to {:?}", requested);
            return false;
        }

        self.state.heading = requested;
        true
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.is_game_over() {
            return TickOutcome::Ignored;
        }

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.heading);

        if let Some(cause) = self.check_collision(new_head) {
            return self.end_game(cause);
        }

        self.state.snake.push_head(new_head);
        self.state.ticks += 1;

        if self.state.food != Some(new_head) {
            self.state.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.state.score += 1;
        self.state.food = self.spawn_food();
        match self.state.food {
            Some(_) => TickOutcome::Ate {
                score: self.state.score,
            },
            None => self.end_game(GameOverCause::BoardFilled),
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<GameOverCause> {
        if !self.state.is_in_bounds(pos) {
            return Some(GameOverCause::Wall);
        }
        if self.state.snake.contains(pos) {
            return Some(GameOverCause::SelfCollision);
        }
        None
    }

    fn end_game(&mut self, cause: GameOverCause) -> TickOutcome {
        self.state.status = GameStatus::GameOver(cause);
        info!("game over ({:?}), score {}", cause, self.state.score);
        TickOutcome::GameOver {
            cause,
            final_score: self.state.score,
        }
    }

    fn spawn_food(&mut self) -> Option<Position> {
        let food = place_food(
            &mut self.rng,
            &self.state.snake,
            self.config.grid_width,
            self.config.grid_height,
            self.config.food_sample_attempts,
        );
        debug!("food placed at {:?}", food);
        food
    }
}

fn rng_for(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
