//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Preset after this one, wrapping back to Easy
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Enemy speed multiplier for this preset
    pub fn speed_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Interceptors loaded per battery
    pub fn missiles_per_emplacement(&self) -> u32 {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Normal => 10,
            Difficulty::Hard => 8,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Difficulty preset
    pub difficulty: Difficulty,
    /// Initials stamped on a new high score
    pub player_name: String,
    /// Fixed RNG seed (None = seed from the clock)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Draw score/level/stock text
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            player_name: "TCK".to_string(),
            seed: None,
            show_hud: true,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Effective tuning for the chosen preset
    pub fn tuning(&self) -> Tuning {
        let mut tuning = Tuning::default();
        self.apply_to(&mut tuning);
        tuning
    }

    /// Apply preset-dependent values onto an existing tuning
    pub fn apply_to(&self, tuning: &mut Tuning) {
        let factor = self.difficulty.speed_factor();
        tuning.enemy_speed *= factor;
        tuning.enemy_speed_per_level *= factor;
        tuning.enemy_speed_max *= factor;
        tuning.missiles_per_emplacement = self.difficulty.missiles_per_emplacement();
    }

    /// Balance from a tuning file, with this preset applied on top
    pub fn tuning_from_json(&self, json: &str) -> Result<Tuning, serde_json::Error> {
        let mut tuning = Tuning::from_json(json)?;
        self.apply_to(&mut tuning);
        Ok(tuning)
    }

    /// Move to the next difficulty preset; returns the new one
    pub fn cycle_difficulty(&mut self) -> Difficulty {
        self.difficulty = self.difficulty.next();
        self.difficulty
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "silo_defense_settings";

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// Stored preferences, or defaults if none parse (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::storage()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|json| Self::from_json(&json).ok());
        match stored {
            Some(settings) => {
                log::info!("Settings loaded ({})", settings.difficulty.as_str());
                settings
            }
            None => Self::default(),
        }
    }

    /// Persist preferences (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            return;
        };
        match self.to_json() {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Could not store settings");
                }
            }
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_round_trip_names() {
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_normal_preset_matches_default_tuning() {
        assert_eq!(Settings::default().tuning(), Tuning::default());
    }

    #[test]
    fn test_hard_preset_is_faster_with_fewer_missiles() {
        let hard = Settings::from_difficulty(Difficulty::Hard).tuning();
        let normal = Tuning::default();
        assert!(hard.enemy_speed > normal.enemy_speed);
        assert!(hard.missiles_per_emplacement < normal.missiles_per_emplacement);
    }

    #[test]
    fn test_cycle_difficulty_wraps() {
        let mut settings = Settings::default();
        assert_eq!(settings.cycle_difficulty(), Difficulty::Hard);
        assert_eq!(settings.cycle_difficulty(), Difficulty::Easy);
        assert_eq!(settings.cycle_difficulty(), Difficulty::Normal);
    }

    #[test]
    fn test_tuning_file_keeps_preset() {
        let settings = Settings::from_difficulty(Difficulty::Hard);
        let tuning = settings
            .tuning_from_json(r#"{ "enemy_speed": 2.0, "settlement_count": 4 }"#)
            .unwrap();
        assert_eq!(tuning.enemy_speed, 3.0);
        assert_eq!(tuning.settlement_count, 4);
        assert_eq!(tuning.missiles_per_emplacement, 8);
    }

    #[test]
    fn test_settings_json_without_seed() {
        let settings = Settings::from_json(
            r#"{"difficulty":"Easy","player_name":"ZED","show_hud":false}"#,
        )
        .unwrap();
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.seed, None);
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back.player_name, "ZED");
        assert!(!back.show_hud);
    }
}
