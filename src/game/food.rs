//! Food placement.
//!
//! Rejection sampling is tried a bounded number of times. When the board is
//! crowded enough for every sample to land on the snake, the free cells are
//! enumerated and one is picked uniformly, so placement always terminates.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Position, Snake, in_bounds};

/// Pick a cell inside `width` x `height` that the snake does not occupy.
///
/// Returns `None` only when the snake covers the whole grid.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &Snake,
    width: usize,
    height: usize,
    max_attempts: u32,
) -> Option<Position> {
    if width == 0 || height == 0 || snake.len() >= width * height {
        return None;
    }

    for _ in 0..max_attempts {
        let pos = Position::new(
            rng.gen_range(0..width) as i32,
            rng.gen_range(0..height) as i32,
        );
        if !snake.contains(pos) {
            return Some(pos);
        }
    }

    debug!(
        "rejection sampling gave up after {} attempts, choosing from free cells",
        max_attempts
    );
    let free = free_cells(snake, width, height);
    free.choose(rng).copied()
}

/// Every grid cell not covered by the snake, row by row
pub fn free_cells(snake: &Snake, width: usize, height: usize) -> Vec<Position> {
    let mut occupied = vec![false; width * height];
    for cell in snake.iter() {
        if in_bounds(cell, width, height) {
            occupied[cell.y as usize * width + cell.x as usize] = true;
        }
    }

    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| !occupied[y * width + x])
        .map(|(x, y)| Position::new(x as i32, y as i32))
        .collect()
}
