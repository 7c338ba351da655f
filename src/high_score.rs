//! Durable best-score storage
//!
//! The store holds a single value under one key. [`HighScoreKeeper`] loads it
//! once at startup, shares it across sessions, and writes through on every
//! new record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StoreError;

/// Key-value store for the best score
#[async_trait]
pub trait HighScoreStore: Send + Sync {
    /// Read the stored value; `None` if nothing was ever saved
    async fn load(&self) -> Result<Option<u32>, StoreError>;

    /// Overwrite the stored value
    async fn save(&self, score: u32) -> Result<(), StoreError>;
}

/// On-disk layout of the JSON file
#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Store backed by a small JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HighScoreStore for JsonFileStore {
    async fn load(&self) -> Result<Option<u32>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let record: HighScoreRecord = serde_json::from_str(&contents)?;
                Ok(Some(record.high_score))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, score: u32) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Store that lives only as long as the process
#[derive(Default)]
pub struct MemoryStore {
    value: Mutex<Option<u32>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(score: u32) -> Self {
        Self {
            value: Mutex::new(Some(score)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Last saved value
    pub fn value(&self) -> Option<u32> {
        self.value.lock().map(|v| *v).unwrap_or(None)
    }

    /// Number of writes so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HighScoreStore for MemoryStore {
    async fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value())
    }

    async fn save(&self, score: u32) -> Result<(), StoreError> {
        if let Ok(mut value) = self.value.lock() {
            *value = Some(score);
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Process-wide best score, written through to a store
pub struct HighScoreKeeper {
    best: AtomicU32,
    store: Arc<dyn HighScoreStore>,
    /// Serializes writes so an older record never lands after a newer one
    write_lock: tokio::sync::Mutex<()>,
}

impl HighScoreKeeper {
    /// Read the stored value once. An unreadable store starts from zero.
    pub async fn load(store: Arc<dyn HighScoreStore>) -> Self {
        let best = match store.load().await {
            Ok(Some(score)) => {
                info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                info!("No stored high score, starting from 0");
                0
            }
            Err(e) => {
                warn!("Failed to load high score, starting from 0: {}", e);
                0
            }
        };

        Self {
            best: AtomicU32::new(best),
            store,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn current(&self) -> u32 {
        self.best.load(Ordering::SeqCst)
    }

    /// Offer a score. Returns true and persists if it beats the current best.
    pub async fn record(&self, score: u32) -> bool {
        let previous = self.best.fetch_max(score, Ordering::SeqCst);
        if score <= previous {
            return false;
        }

        let _guard = self.write_lock.lock().await;
        let best = self.current();
        match self.store.save(best).await {
            Ok(()) => debug!("Persisted high score {}", best),
            Err(e) => warn!("Failed to persist high score {}: {}", best, e),
        }
        true
    }
}
