//! Silo Defense - A missile-defense arcade game
//!
//! Core modules:
//! - `sim`: Simulation (kinematics, blasts, collisions, game state)
//! - `renderer`: Drawing-surface abstraction and scene drawing
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `highscores`: High score record

pub mod error;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use highscores::HighScore;
pub use settings::{Difficulty, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels, origin at top-left, y grows downward)
    pub const ARENA_WIDTH: f32 = 600.0;
    pub const ARENA_HEIGHT: f32 = 550.0;

    /// Battery footprint
    pub const EMPLACEMENT_WIDTH: f32 = 60.0;
    pub const EMPLACEMENT_HEIGHT: f32 = 60.0;
    /// Horizontal distance from the arena edge to the outer batteries' centres
    pub const EMPLACEMENT_MARGIN: f32 = 30.0;

    /// City footprint
    pub const SETTLEMENT_WIDTH: f32 = 40.0;
    pub const SETTLEMENT_HEIGHT: f32 = 30.0;

    /// Missiles are drawn and collided as small squares around their head
    pub const PROJECTILE_SIZE: f32 = 3.0;
}

/// Clamp a point into the arena rectangle
#[inline]
pub fn clamp_to_arena(point: Vec2) -> Vec2 {
    Vec2::new(
        point.x.clamp(0.0, consts::ARENA_WIDTH),
        point.y.clamp(0.0, consts::ARENA_HEIGHT),
    )
}
