//! Collision detection logic

use super::location::{Grid, Location};
use super::snake::Snake;

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head left the board
    Wall,
    /// Head landed on its own body
    SelfBite,
}

/// Head outside [0, width) x [0, height)
pub fn hits_wall(grid: &Grid, head: &Location) -> bool {
    !grid.contains(head)
}

/// Head on any body segment
pub fn hits_self(snake: &Snake) -> bool {
    snake.body().contains(&snake.head())
}

/// Check a snake that has already been advanced. Wall wins over self.
pub fn check_collision(grid: &Grid, snake: &Snake) -> Option<Collision> {
    if hits_wall(grid, &snake.head()) {
        Some(Collision::Wall)
    } else if hits_self(snake) {
        Some(Collision::SelfBite)
    } else {
        None
    }
}
