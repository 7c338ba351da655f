//! One player's game: phase machine plus the per-tick update

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use super::collision::{check_collision, Collision};
use super::direction::Direction;
use super::food::place_food;
use super::location::{Grid, Location};
use super::scoring::{FoodAward, Scoreboard};
use super::snake::Snake;
use crate::config::{START_X, START_Y};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    NotStarted,
    Running,
    Over,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndCause {
    Wall,
    #[serde(rename = "self")]
    SelfBite,
    /// The snake filled the whole board
    Cleared,
}

impl From<Collision> for EndCause {
    fn from(collision: Collision) -> Self {
        match collision {
            Collision::Wall => EndCause::Wall,
            Collision::SelfBite => EndCause::SelfBite,
        }
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing moved
    Idle,
    Moved,
    Ate(FoodAward),
    GameOver(EndCause),
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub grid: Grid,
    /// Head first
    pub snake: Vec<Location>,
    pub food: Option<Location>,
    pub heading: Direction,
    pub score: u32,
    pub high_score: u32,
    pub speed_ms: u64,
}

pub struct GameSession {
    grid: Grid,
    start: Location,
    phase: GamePhase,
    snake: Snake,
    /// Heading the next tick will use
    heading: Direction,
    /// Heading of the last step actually taken
    last_moved: Direction,
    food: Option<Location>,
    scoreboard: Scoreboard,
    end_cause: Option<EndCause>,
    rng: StdRng,
}

impl GameSession {
    /// A session on the standard board
    pub fn new(high_score: u32) -> Self {
        Self::with_grid(Grid::default(), Location::new(START_X, START_Y), high_score)
    }

    pub fn with_grid(grid: Grid, start: Location, high_score: u32) -> Self {
        Self {
            grid,
            start,
            phase: GamePhase::NotStarted,
            snake: Snake::new(start),
            heading: Direction::None,
            last_moved: Direction::None,
            food: None,
            scoreboard: Scoreboard::new(high_score),
            end_cause: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the random source with a seeded one
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn food(&self) -> Option<Location> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scoreboard.high_score()
    }

    pub fn speed_ms(&self) -> u64 {
        self.scoreboard.speed_ms()
    }

    pub fn end_cause(&self) -> Option<EndCause> {
        self.end_cause
    }

    /// Interval the loop driver should tick at; None when no ticks are wanted
    pub fn tick_interval(&self) -> Option<Duration> {
        match self.phase {
            GamePhase::Running => Some(self.scoreboard.tick_interval()),
            _ => None,
        }
    }

    /// Put the snake in a given shape and heading, e.g. for scripted scenarios
    pub fn set_snake(&mut self, snake: Snake, heading: Direction) {
        self.snake = snake;
        self.heading = heading;
        self.last_moved = heading;
    }

    /// Put the food on a given cell
    pub fn set_food(&mut self, food: Location) {
        self.food = Some(food);
    }

    /// Begin play. Ignored unless the session has not started yet.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }

        self.phase = GamePhase::Running;
        match place_food(&self.grid, &self.snake, &mut self.rng) {
            Ok(food) => self.food = Some(food),
            Err(_) => {
                self.finish(EndCause::Cleared);
            }
        }
        true
    }

    /// Back to a fresh, unstarted game. The best score is kept.
    pub fn reset(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.snake = Snake::new(self.start);
        self.heading = Direction::None;
        self.last_moved = Direction::None;
        self.food = None;
        self.end_cause = None;
        self.scoreboard.reset();
    }

    /// Take a best score set by another session; never lowers ours
    pub fn adopt_high_score(&mut self, high_score: u32) {
        self.scoreboard.adopt_high_score(high_score);
    }

    /// Change heading. Ignored when not running, and when the new heading
    /// reverses either the pending heading or the last step taken.
    pub fn handle_input(&mut self, direction: Direction) -> bool {
        if self.phase != GamePhase::Running || !direction.is_moving() {
            return false;
        }
        if direction.is_opposite(&self.heading) || direction.is_opposite(&self.last_moved) {
            debug!(?direction, heading = ?self.heading, "Reversal ignored");
            return false;
        }

        self.heading = direction;
        true
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Running || !self.heading.is_moving() {
            return TickOutcome::Idle;
        }

        let mut moved = self.snake.clone();
        moved.advance(self.heading, self.grid.block);

        // The fatal position is never committed
        if let Some(collision) = check_collision(&self.grid, &moved) {
            return self.finish(collision.into());
        }

        self.snake = moved;
        self.last_moved = self.heading;

        if self.food != Some(self.snake.head()) {
            return TickOutcome::Moved;
        }

        self.snake.grow();
        let award = self.scoreboard.on_food_eaten();
        match place_food(&self.grid, &self.snake, &mut self.rng) {
            Ok(food) => {
                self.food = Some(food);
                TickOutcome::Ate(award)
            }
            Err(_) => {
                self.food = None;
                self.finish(EndCause::Cleared)
            }
        }
    }

    fn finish(&mut self, cause: EndCause) -> TickOutcome {
        self.phase = GamePhase::Over;
        self.end_cause = Some(cause);
        self.scoreboard.record_high_score();
        TickOutcome::GameOver(cause)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            grid: self.grid,
            snake: self.snake.cells().collect(),
            food: self.food,
            heading: self.heading,
            score: self.scoreboard.score(),
            high_score: self.scoreboard.high_score(),
            speed_ms: self.scoreboard.speed_ms(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(0)
    }
}
