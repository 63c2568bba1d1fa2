//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies

pub mod blast;
pub mod collision;
pub mod defense;
pub mod piece;
pub mod projectile;
pub mod state;
pub mod tick;

pub use blast::{Blast, BlastPhase};
pub use collision::{
    InterceptReport, explosion_detection_emplacements, explosion_detection_projectiles,
    explosion_detection_settlements, objective_detection,
};
pub use defense::{Emplacement, Settlement, layout_emplacements, layout_settlements};
pub use piece::{Color, Entity, Piece};
pub use projectile::{Projectile, Side};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, step, tick};
