//! Score, tick speed and best score bookkeeping

use std::time::Duration;

use crate::config::{INITIAL_SPEED_MS, MIN_SPEED_MS, POINTS_PER_FOOD, SPEED_INCREMENT};

/// Tick interval in milliseconds for a given score
pub fn speed_for(score: u32) -> u64 {
    let ms = (INITIAL_SPEED_MS as f64 - score as f64 * SPEED_INCREMENT).max(MIN_SPEED_MS as f64);
    ms as u64
}

/// Result of eating one food item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodAward {
    pub score: u32,
    pub speed_ms: u64,
    /// The tick interval differs from the one before this food
    pub speed_changed: bool,
    /// The score just passed the previous best
    pub new_record: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    speed_ms: u64,
    high_score: u32,
}

impl Scoreboard {
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            speed_ms: INITIAL_SPEED_MS,
            high_score,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Award points, speed up, and bump the best score if it was beaten
    pub fn on_food_eaten(&mut self) -> FoodAward {
        self.score += POINTS_PER_FOOD;
        let speed_ms = speed_for(self.score);
        let speed_changed = speed_ms != self.speed_ms;
        self.speed_ms = speed_ms;

        FoodAward {
            score: self.score,
            speed_ms,
            speed_changed,
            new_record: self.record_high_score(),
        }
    }

    /// Raise the best score to the current score if it is higher
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Take a best score achieved elsewhere, never lowering ours
    pub fn adopt_high_score(&mut self, high_score: u32) {
        self.high_score = self.high_score.max(high_score);
    }

    /// Back to a fresh game; the best score is kept
    pub fn reset(&mut self) {
        self.score = 0;
        self.speed_ms = INITIAL_SPEED_MS;
    }
}
