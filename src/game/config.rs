use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use super::state::{Position, in_bounds};

const DEFAULT_GRID_SIZE: usize = 15;
const DEFAULT_START: Position = Position { x: 5, y: 5 };
const DEFAULT_FOOD: Position = Position { x: 10, y: 10 };

/// Configuration for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns
    pub grid_width: usize,
    /// Number of rows
    pub grid_height: usize,
    /// Cell of the single-segment snake after a reset
    pub start: Position,
    /// Food cell after a reset; sampled randomly when absent
    pub initial_food: Option<Position>,
    /// Time between two ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Random samples tried before falling back to the free-cell list
    pub food_sample_attempts: u32,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            start: DEFAULT_START,
            initial_food: Some(DEFAULT_FOOD),
            tick_interval_ms: 200,
            food_sample_attempts: 64,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self::default().with_grid(width, height)
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Grid that fits a display of `width` x `height` units, with cells of
    /// `cell_width` x `cell_height` units
    pub fn from_display(width: u16, height: u16, cell_width: u16, cell_height: u16) -> Self {
        let columns = width / cell_width.max(1);
        let rows = height / cell_height.max(1);
        Self::new(columns as usize, rows as usize)
    }

    /// Change the grid size, moving the start and food cells to valid
    /// places when the defaults no longer fit
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;

        if !in_bounds(self.start, width, height) {
            self.start = Position::new((width / 2) as i32, (height / 2) as i32);
        }
        self.initial_food = self
            .initial_food
            .filter(|food| in_bounds(*food, width, height) && *food != self.start);
        self
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check the bounds the engine relies on
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must have at least one row and one column, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.cell_count() >= 2,
            "grid must hold the snake and one food cell, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            i32::try_from(self.grid_width).is_ok() && i32::try_from(self.grid_height).is_ok(),
            "grid dimensions do not fit cell coordinates"
        );
        ensure!(
            in_bounds(self.start, self.grid_width, self.grid_height),
            "start cell ({}, {}) is outside the {}x{} grid",
            self.start.x,
            self.start.y,
            self.grid_width,
            self.grid_height
        );
        if let Some(food) = self.initial_food {
            ensure!(
                in_bounds(food, self.grid_width, self.grid_height),
                "initial food ({}, {}) is outside the grid",
                food.x,
                food.y
            );
            ensure!(food != self.start, "initial food must not sit on the snake");
        }
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width.saturating_mul(self.grid_height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
