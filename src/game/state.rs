use std::collections::{HashSet, VecDeque};

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid: `x` is the column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`
    pub fn moved_in_direction(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The snake body, tail at the front and head at the back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// A snake of length one
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from cells ordered tail first, head last
    pub fn from_cells(cells: impl IntoIterator<Item = Position>) -> Result<Self> {
        let body: VecDeque<Position> = cells.into_iter().collect();
        ensure!(!body.is_empty(), "snake needs at least one cell");

        let mut seen = HashSet::with_capacity(body.len());
        for cell in &body {
            ensure!(
                seen.insert(*cell),
                "snake occupies ({}, {}) more than once",
                cell.x,
                cell.y
            );
        }

        Ok(Self { body })
    }

    pub fn head(&self) -> Position {
        // never empty: every constructor checks and pop_tail keeps one cell
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept alongside `len`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Cells from tail to head
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_back(pos);
    }

    /// Drops the tail cell. A single-cell snake is left untouched.
    pub(crate) fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_front()
        } else {
            None
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// The head left the grid
    Wall,
    /// The head ran into the body
    SelfCollision,
    /// The snake covers every cell, no food can be placed
    BoardFilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(GameOverCause),
}

/// Everything the presentation layer may read about a game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the board is filled
    pub food: Option<Position>,
    pub heading: Direction,
    pub score: u32,
    pub status: GameStatus,
    /// Successful moves since the last reset
    pub ticks: u32,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl GameState {
    /// A running game with score zero
    pub fn new(
        snake: Snake,
        heading: Direction,
        food: Option<Position>,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        Self {
            snake,
            food,
            heading,
            score: 0,
            status: GameStatus::Running,
            ticks: 0,
            grid_width,
            grid_height,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        match self.status {
            GameStatus::Running => None,
            GameStatus::GameOver(cause) => Some(cause),
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        in_bounds(pos, self.grid_width, self.grid_height)
    }
}

pub(crate) fn in_bounds(pos: Position, width: usize, height: usize) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}
