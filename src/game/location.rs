//! Grid positions and the playfield they live on

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::config::{BLOCK_SIZE, COLS, ROWS};

/// A position on the board, in pixels (always a multiple of the block size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The location one step away in the given direction.
    /// Does not wrap: the result may lie off the board.
    pub fn adjacent(&self, direction: Direction, block: i32) -> Location {
        let (dx, dy) = direction.velocity(block);
        Location::new(self.x + dx, self.y + dy)
    }
}

/// Fixed-size playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    pub block: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cols: COLS,
            rows: ROWS,
            block: BLOCK_SIZE,
        }
    }
}

impl Grid {
    pub fn new(cols: i32, rows: i32, block: i32) -> Self {
        Self { cols, rows, block }
    }

    pub fn width(&self) -> i32 {
        self.cols * self.block
    }

    pub fn height(&self) -> i32 {
        self.rows * self.block
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        (self.cols * self.rows) as usize
    }

    /// Whether a location lies inside [0, width) x [0, height)
    pub fn contains(&self, loc: &Location) -> bool {
        loc.x >= 0 && loc.x < self.width() && loc.y >= 0 && loc.y < self.height()
    }

    /// Location of the cell at (column, row)
    pub fn cell(&self, col: i32, row: i32) -> Location {
        Location::new(col * self.block, row * self.block)
    }

    /// A uniformly random cell
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Location {
        self.cell(rng.gen_range(0..self.cols), rng.gen_range(0..self.rows))
    }
}
