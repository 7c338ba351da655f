//! Heading of the snake

use serde::{Deserialize, Serialize};

/// Direction of movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Not moving yet
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Parse a direction from a key code or a plain name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "arrowup" | "up" | "north" => Some(Direction::Up),
            "arrowdown" | "down" | "south" => Some(Direction::Down),
            "arrowleft" | "left" | "west" => Some(Direction::Left),
            "arrowright" | "right" | "east" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Check if this direction is the exact reverse of another
    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Check if the snake is moving (not None)
    pub fn is_moving(&self) -> bool {
        !matches!(self, Direction::None)
    }

    /// Displacement for one step, scaled by the cell size
    pub fn velocity(&self, block: i32) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -block),
            Direction::Down => (0, block),
            Direction::Left => (-block, 0),
            Direction::Right => (block, 0),
        }
    }
}
