//! Detonation and destruction passes
//!
//! Two passes run each tick. Objective detection turns projectiles that
//! reached their destination into blasts. Explosion detection tests every
//! live blast against a target collection; anything overlapping is
//! destroyed. Every destruction goes through a blast, including direct hits.

use super::blast::Blast;
use super::defense::{Emplacement, Settlement};
use super::piece::{Entity, Piece};
use super::projectile::{Projectile, Side};
use crate::tuning::Tuning;

impl Entity for Projectile {
    fn piece(&self) -> &Piece {
        &self.piece
    }
}

impl Entity for Blast {
    fn piece(&self) -> &Piece {
        &self.piece
    }
}

impl Entity for Emplacement {
    fn piece(&self) -> &Piece {
        &self.piece
    }
}

impl Entity for Settlement {
    fn piece(&self) -> &Piece {
        &self.piece
    }
}

/// Outcome of a blast pass over enemy projectiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterceptReport {
    /// Enemy projectiles destroyed; each one scores
    pub destroyed: u32,
}

/// Blasts overlapping `target`, skipping spent ones
fn striking<'a, T: Entity>(target: &'a T, blasts: &'a [Blast]) -> impl Iterator<Item = &'a Blast> {
    blasts
        .iter()
        .filter(move |blast| !blast.is_spent() && blast.overlaps(target))
}

/// Remove arrived projectiles, detonating each at its destination.
///
/// Returns the number of blasts spawned.
pub fn objective_detection(
    projectiles: &mut Vec<Projectile>,
    blasts: &mut Vec<Blast>,
    tuning: &Tuning,
) -> usize {
    let before = blasts.len();
    projectiles.retain(|missile| {
        if missile.has_arrived() {
            let by_player = missile.side == Side::Player;
            blasts.push(Blast::from_tuning(missile.destination, tuning, by_player));
            false
        } else {
            true
        }
    });
    blasts.len() - before
}

/// Destroy enemy projectiles caught in a blast.
///
/// Each one destroyed detonates in turn with a player-caused blast, so a
/// single interception can chain through a whole wave. New blasts start at
/// size 0 and only join the hunt from the next tick.
pub fn explosion_detection_projectiles(
    blasts: &mut Vec<Blast>,
    projectiles: &mut Vec<Projectile>,
    tuning: &Tuning,
) -> InterceptReport {
    let mut report = InterceptReport::default();
    let mut chained = Vec::new();
    let live: &[Blast] = blasts;

    projectiles.retain(|missile| {
        if striking(missile, live).next().is_none() {
            return true;
        }
        report.destroyed += 1;
        chained.push(Blast::from_tuning(missile.head(), tuning, true));
        false
    });

    blasts.extend(chained);
    report
}

/// Flag cities caught in any blast; returns how many fell this pass
pub fn explosion_detection_settlements(blasts: &[Blast], settlements: &mut [Settlement]) -> u32 {
    let mut destroyed = 0;
    for city in settlements.iter_mut().filter(|c| !c.destroyed) {
        if striking(&*city, blasts).next().is_some() {
            city.destroy();
            destroyed += 1;
        }
    }
    destroyed
}

/// Flag batteries caught in any blast; their magazines are lost
pub fn explosion_detection_emplacements(blasts: &[Blast], emplacements: &mut [Emplacement]) -> u32 {
    let mut destroyed = 0;
    for battery in emplacements.iter_mut().filter(|b| !b.destroyed) {
        if striking(&*battery, blasts).next().is_some() {
            battery.destroy();
            destroyed += 1;
        }
    }
    destroyed
}
