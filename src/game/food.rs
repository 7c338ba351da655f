//! Food placement

use rand::Rng;

use super::location::{Grid, Location};
use super::snake::Snake;
use crate::error::GameError;

/// Pick a uniformly random free cell by rejection sampling.
///
/// Fails with [`GameError::BoardFull`] when the snake covers every cell,
/// so the sampling loop always has somewhere to land.
pub fn place_food<R: Rng>(
    grid: &Grid,
    snake: &Snake,
    rng: &mut R,
) -> Result<Location, GameError> {
    if snake.len() >= grid.cell_count() {
        return Err(GameError::BoardFull);
    }

    loop {
        let candidate = grid.random_cell(rng);
        if !snake.occupies(&candidate) {
            return Ok(candidate);
        }
    }
}
