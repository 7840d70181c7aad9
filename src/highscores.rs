//! High score persistence contract
//!
//! The simulation only compares scores and asks for a save; the host decides
//! where the number lives. Saves are fire-and-forget: a backend that fails
//! logs and moves on.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Host-side storage for the single best score
pub trait HighScoreStore {
    fn load_high_score(&self) -> Option<i64>;
    fn save_high_score(&mut self, score: i64);
}

/// In-memory store. Clones share one slot, so a host can keep a handle
/// while the run controller owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScores {
    slot: Rc<Cell<Option<i64>>>,
}

impl MemoryHighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing best score
    pub fn with_score(score: i64) -> Self {
        Self {
            slot: Rc::new(Cell::new(Some(score))),
        }
    }
}

impl HighScoreStore for MemoryHighScores {
    fn load_high_score(&self) -> Option<i64> {
        self.slot.get()
    }

    fn save_high_score(&mut self, score: i64) {
        self.slot.set(Some(score));
    }
}

/// Stored high score entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: i64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Browser LocalStorage backend (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageHighScores;

#[cfg(target_arch = "wasm32")]
impl LocalStorageHighScores {
    const STORAGE_KEY: &'static str = "ocean_run_highscore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageHighScores {
    fn load_high_score(&self) -> Option<i64> {
        let json = Self::storage()?.get_item(Self::STORAGE_KEY).ok().flatten()?;
        match serde_json::from_str::<HighScoreRecord>(&json) {
            Ok(record) => {
                log::info!("Loaded high score {}", record.score);
                Some(record.score)
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {}", e);
                None
            }
        }
    }

    fn save_high_score(&mut self, score: i64) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score not saved");
            return;
        };
        let record = HighScoreRecord {
            score,
            timestamp: js_sys::Date::now(),
        };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to write high score");
                } else {
                    log::info!("High score saved ({})", score);
                }
            }
            Err(e) => log::warn!("Failed to encode high score: {}", e),
        }
    }
}
