//! Data-driven game balance
//!
//! Every number that shapes a run lives here so presets and tests can tweak
//! them without touching simulation code. Partial JSON documents are
//! accepted; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Defenses ===
    /// Cities placed at the start of each level
    pub settlement_count: usize,
    /// Batteries placed at the start of each level
    pub emplacement_count: usize,
    /// Missiles loaded into each battery per level
    pub missiles_per_emplacement: u32,

    // === Projectiles ===
    /// Interceptor speed (pixels per tick)
    pub player_speed: f32,
    /// Enemy speed on level 1 (pixels per tick)
    pub enemy_speed: f32,
    /// Enemy speed added per level after the first
    pub enemy_speed_per_level: f32,
    /// Enemy speed ceiling
    pub enemy_speed_max: f32,

    // === Waves ===
    /// Enemy missiles launched on level 1
    pub wave_base_count: u32,
    /// Enemy missiles added per level after the first
    pub wave_count_per_level: u32,
    /// Largest wave ever launched
    pub wave_max_count: u32,

    // === Blasts ===
    /// Blast diameter at full size
    pub blast_max_size: f32,
    /// Diameter change per tick while growing or collapsing
    pub blast_growth: f32,
    /// Ticks a blast holds at full size
    pub blast_hold_ticks: u32,

    // === Scoring ===
    /// Points for each enemy missile destroyed by a blast
    pub points_per_missile: u64,
    /// Level-clear bonus per surviving city
    pub bonus_per_settlement: u64,
    /// Level-clear bonus per unspent interceptor
    pub bonus_per_missile: u64,

    /// Ticks spent in the level-cleared breather before the next wave
    pub breather_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            settlement_count: 6,
            emplacement_count: 3,
            missiles_per_emplacement: 10,

            player_speed: 8.0,
            enemy_speed: 1.0,
            enemy_speed_per_level: 0.25,
            enemy_speed_max: 3.0,

            wave_base_count: 10,
            wave_count_per_level: 10,
            wave_max_count: 20,

            blast_max_size: 50.0,
            blast_growth: 1.5,
            blast_hold_ticks: 20,

            points_per_missile: 25,
            bonus_per_settlement: 100,
            bonus_per_missile: 5,

            breather_ticks: 60,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields fall back to defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of enemy missiles launched on `level` (1-based)
    pub fn wave_count(&self, level: u32) -> u32 {
        let extra = level.saturating_sub(1).saturating_mul(self.wave_count_per_level);
        self.wave_base_count
            .saturating_add(extra)
            .min(self.wave_max_count)
    }

    /// Enemy missile speed on `level` (1-based)
    pub fn enemy_speed_for_level(&self, level: u32) -> f32 {
        let extra = level.saturating_sub(1) as f32 * self.enemy_speed_per_level;
        (self.enemy_speed + extra).min(self.enemy_speed_max)
    }

    /// Total interceptor stock at the start of a level
    pub fn starting_stock(&self) -> u32 {
        let batteries = u32::try_from(self.emplacement_count).unwrap_or(u32::MAX);
        self.missiles_per_emplacement.saturating_mul(batteries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_count_scales_and_caps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.wave_count(1), 10);
        assert_eq!(tuning.wave_count(2), 20);
        assert_eq!(tuning.wave_count(4), 20);
    }

    #[test]
    fn test_enemy_speed_caps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.enemy_speed_for_level(1), 1.0);
        assert_eq!(tuning.enemy_speed_for_level(3), 1.5);
        assert_eq!(tuning.enemy_speed_for_level(100), tuning.enemy_speed_max);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "missiles_per_emplacement": 4 }"#).unwrap();
        assert_eq!(tuning.missiles_per_emplacement, 4);
        assert_eq!(tuning.settlement_count, 6);
        assert_eq!(tuning.starting_stock(), 12);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_starting_stock_saturates() {
        let tuning = Tuning::from_json(
            r#"{ "missiles_per_emplacement": 4000000000, "emplacement_count": 3 }"#,
        )
        .unwrap();
        assert_eq!(tuning.starting_stock(), u32::MAX);
    }
}
