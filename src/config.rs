//! Game constants and server configuration

use std::env;
use std::path::PathBuf;

// =============================================================================
// Playfield
// =============================================================================

/// Size of one grid cell in pixels
pub const BLOCK_SIZE: i32 = 25;

/// Number of columns on the board
pub const COLS: i32 = 20;

/// Number of rows on the board
pub const ROWS: i32 = 20;

/// Head position of a fresh snake, in pixels
pub const START_X: i32 = BLOCK_SIZE * 5;
pub const START_Y: i32 = BLOCK_SIZE * 5;

// =============================================================================
// Speed and scoring
// =============================================================================

/// Tick interval at score zero, in milliseconds
pub const INITIAL_SPEED_MS: u64 = 100;

/// Fastest allowed tick interval, in milliseconds
pub const MIN_SPEED_MS: u64 = 50;

/// Milliseconds shaved off the tick interval per point scored
pub const SPEED_INCREMENT: f64 = 0.5;

/// Points awarded for each food eaten
pub const POINTS_PER_FOOD: u32 = 10;

// =============================================================================
// Server
// =============================================================================

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP / WebSocket port
pub const DEFAULT_PORT: u16 = 8080;

/// Default location of the persisted high score
pub const DEFAULT_HIGH_SCORE_FILE: &str = "high_score.json";

/// Capacity of the per-session command and outbound message channels
pub const SESSION_CHANNEL_CAPACITY: usize = 64;

/// Runtime settings for the server binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub high_score_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
        }
    }
}

impl ServerConfig {
    /// Load config from `SNAKE_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("SNAKE_HOST").unwrap_or(defaults.host),
            port: lookup("SNAKE_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            high_score_file: lookup("SNAKE_HIGH_SCORE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.high_score_file),
        }
    }

    /// Full bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
