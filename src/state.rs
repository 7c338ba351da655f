//! Application state shared across all handlers

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::high_score::{HighScoreKeeper, HighScoreStore};

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
    /// Best score across every session in this process
    pub high_scores: Arc<HighScoreKeeper>,
}

impl AppState {
    /// Build the state, reading the stored high score once
    pub async fn new(config: ServerConfig, store: Arc<dyn HighScoreStore>) -> Self {
        Self {
            config,
            high_scores: Arc::new(HighScoreKeeper::load(store).await),
        }
    }
}
