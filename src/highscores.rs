//! High score record
//!
//! A single best run, persisted to LocalStorage on the web.

use serde::{Deserialize, Serialize};

/// The best finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    /// Player's initials
    pub player_name: String,
    /// Level reached
    pub level: u32,
    /// Final score
    pub score: u64,
}

impl Default for HighScore {
    fn default() -> Self {
        Self {
            player_name: "TCK".to_string(),
            level: 0,
            score: 0,
        }
    }
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "silo_defense_highscore";

    /// Check if a finished score beats the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Replace the record if `score` beats it; returns whether it did
    pub fn submit(&mut self, player_name: &str, level: u32, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.player_name = player_name.to_string();
        self.level = level;
        self.score = score;
        true
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the record from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(record) = Self::from_json(&json) {
                    log::info!("Loaded high score {} ({})", record.score, record.player_name);
                    return record;
                }
            }
        }

        log::info!("No high score found, starting fresh");
        Self::default()
    }

    /// Save the record to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score saved ({})", self.score);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
