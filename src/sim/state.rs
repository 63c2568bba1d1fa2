//! Game state and arena-level operations
//!
//! `GameState` is the arena: it owns every entity collection and is the only
//! thing that mutates them. Entities never point at each other.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::blast::Blast;
use super::defense::{Emplacement, Settlement, layout_emplacements, layout_settlements};
use super::projectile::{Projectile, Side};
use crate::clamp_to_arena;
use crate::consts::*;
use crate::error::GameError;
use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Nothing placed yet; waiting for `new_game`
    Setup,
    /// Active gameplay
    Playing,
    /// Wave resolved; next wave launches when the timer runs out
    LevelCleared { breather_ticks: u32 },
    /// Every city is gone
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Balance values for this run
    pub tuning: Tuning,
    /// Initials stamped on a new high score
    pub player_name: String,
    pub player_missiles: Vec<Projectile>,
    pub enemy_missiles: Vec<Projectile>,
    pub blasts: Vec<Blast>,
    pub settlements: Vec<Settlement>,
    pub emplacements: Vec<Emplacement>,
    /// Current level (1-based once a game starts)
    pub level: u32,
    /// Enemy projectiles of the current wave still in flight
    pub remaining_enemy_wave: u32,
    /// Sum of live batteries' magazines
    pub player_missile_count: u32,
    pub score: u64,
    pub high_score: HighScore,
    /// Set when the last finished game replaced the high score
    pub new_high_score: bool,
    pub phase: GamePhase,
    pub paused: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            player_name: HighScore::default().player_name,
            player_missiles: Vec::new(),
            enemy_missiles: Vec::new(),
            blasts: Vec::new(),
            settlements: Vec::new(),
            emplacements: Vec::new(),
            level: 1,
            remaining_enemy_wave: 0,
            player_missile_count: 0,
            score: 0,
            high_score: HighScore::default(),
            new_high_score: false,
            phase: GamePhase::Setup,
            paused: false,
            time_ticks: 0,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Discard everything and start again from level 1
    pub fn new_game(&mut self) {
        self.level = 1;
        self.score = 0;
        self.paused = false;
        self.new_high_score = false;
        self.time_ticks = 0;
        self.start_level();
        log::info!("New game (seed {})", self.seed);
    }

    /// Move on to the next level immediately
    pub fn new_level(&mut self) {
        self.level += 1;
        self.start_level();
    }

    /// Rebuild the ground defenses, clear the sky and launch this level's wave
    pub fn start_level(&mut self) {
        self.player_missiles.clear();
        self.enemy_missiles.clear();
        self.blasts.clear();
        self.emplacements = layout_emplacements(
            self.tuning.emplacement_count,
            self.tuning.missiles_per_emplacement,
        );
        self.settlements = layout_settlements(self.tuning.settlement_count, &self.emplacements);
        self.player_missile_count = self.tuning.starting_stock();
        self.phase = GamePhase::Playing;
        self.launch_wave();
    }

    /// Recompute the aggregate interceptor stock
    pub fn set_player_missile_count(&mut self) {
        self.player_missile_count = self
            .emplacements
            .iter()
            .filter(|b| !b.destroyed)
            .map(|b| b.missile_count)
            .fold(0, u32::saturating_add);
    }

    /// Launch this level's enemy wave from random points along the top edge
    pub fn launch_wave(&mut self) {
        let count = self.tuning.wave_count(self.level);
        let speed = self.tuning.enemy_speed_for_level(self.level);

        let targets: Vec<Vec2> = self
            .settlements
            .iter()
            .filter(|c| !c.destroyed)
            .map(|c| c.piece.center())
            .chain(
                self.emplacements
                    .iter()
                    .filter(|b| !b.destroyed)
                    .map(|b| b.piece.center()),
            )
            .collect();

        for _ in 0..count {
            let origin = Vec2::new(self.rng.random_range(0.0..ARENA_WIDTH), 0.0);
            let destination = if targets.is_empty() {
                Vec2::new(self.rng.random_range(0.0..ARENA_WIDTH), ARENA_HEIGHT)
            } else {
                targets[self.rng.random_range(0..targets.len())]
            };
            self.enemy_missiles
                .push(Projectile::new(origin, destination, speed, Side::Enemy));
        }

        self.remaining_enemy_wave = self.enemy_missiles.len() as u32;
        log::info!("Level {}: {} enemy missiles at speed {:.2}", self.level, count, speed);
    }

    /// Index of the loaded battery nearest to `x` (ties go left)
    pub fn nearest_emplacement(&self, x: f32) -> Option<usize> {
        self.emplacements
            .iter()
            .enumerate()
            .filter(|(_, b)| b.can_fire())
            .map(|(i, b)| (i, (b.launch_point().x - x).abs()))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
    }

    /// Fire from the best battery toward `point` (clamped into the arena).
    ///
    /// Returns the index of the battery that fired.
    pub fn resolve_player_input(&mut self, point: Vec2) -> Result<usize, GameError> {
        if self.paused || self.phase != GamePhase::Playing {
            return Err(GameError::NotPlaying);
        }
        let target = clamp_to_arena(point);
        let index = self
            .nearest_emplacement(target.x)
            .ok_or(GameError::NoLivingTarget)?;
        let missile = self.emplacements[index].fire(target, self.tuning.player_speed)?;
        self.player_missiles.push(missile);
        self.set_player_missile_count();
        Ok(index)
    }

    /// Flip pause; nothing else changes
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Drop spent blasts, destroyed defenses and strays; refresh counters
    pub fn cull(&mut self) {
        self.blasts.retain(|b| !b.is_spent());
        self.settlements.retain(|c| !c.destroyed);
        self.emplacements.retain(|b| !b.destroyed);
        self.player_missiles.retain(|m| !m.is_out_of_play());
        self.enemy_missiles.retain(|m| !m.is_out_of_play());
        self.remaining_enemy_wave = self.enemy_missiles.len() as u32;
        self.set_player_missile_count();
    }

    /// Points for surviving cities and unspent interceptors
    pub fn level_bonus(&self) -> u64 {
        self.settlements.len() as u64 * self.tuning.bonus_per_settlement
            + self.player_missile_count as u64 * self.tuning.bonus_per_missile
    }

    /// Bank the level bonus and move to the next level (after the breather)
    pub(crate) fn complete_level(&mut self) {
        let bonus = self.level_bonus();
        self.score += bonus;
        self.player_missiles.clear();
        log::info!(
            "Level {} cleared: {} cities left, bonus {}",
            self.level,
            self.settlements.len(),
            bonus
        );

        if self.tuning.breather_ticks == 0 {
            self.new_level();
        } else {
            self.level += 1;
            self.phase = GamePhase::LevelCleared {
                breather_ticks: self.tuning.breather_ticks,
            };
        }
    }

    /// Enter the terminal state and update the high score
    pub(crate) fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.new_high_score = self
            .high_score
            .submit(&self.player_name, self.level, self.score);
        if self.new_high_score {
            log::info!("New high score: {} ({})", self.score, self.player_name);
        }
        log::info!("Game over on level {} with {} points", self.level, self.score);
    }
}
