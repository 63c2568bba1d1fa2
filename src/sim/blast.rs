//! Explosions
//!
//! A blast is a square hazard centred on its detonation point. It grows to
//! `max_size`, holds for a few ticks, collapses back to nothing and is then
//! spent. Collision uses the bounding square of the drawn circle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};
use crate::tuning::Tuning;

/// Smallest growth rate a blast may be built with
pub const MIN_GROWTH: f32 = 0.01;

/// Lifecycle phase of a blast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlastPhase {
    Growing,
    Holding { ticks_left: u32 },
    Collapsing,
    Spent,
}

/// An expanding-then-collapsing explosion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blast {
    /// Bounding square; `piece.dv` is the per-tick size change
    pub piece: Piece,
    pub max_size: f32,
    /// Set for player detonations and chain reactions, clear for enemy impacts
    pub caused_by_player: bool,
    pub phase: BlastPhase,
    hold_ticks: u32,
}

impl Blast {
    /// A freshly detonated blast (size 0)
    pub fn new(
        center: Vec2,
        max_size: f32,
        growth: f32,
        hold_ticks: u32,
        caused_by_player: bool,
    ) -> Self {
        let mut piece = Piece::centered(center, 0.0, Color::EXPLOSION);
        piece.dv = growth.max(MIN_GROWTH);
        Self {
            piece,
            max_size: max_size.max(0.0),
            caused_by_player,
            phase: BlastPhase::Growing,
            hold_ticks,
        }
    }

    pub fn from_tuning(center: Vec2, tuning: &Tuning, caused_by_player: bool) -> Self {
        Self::new(
            center,
            tuning.blast_max_size,
            tuning.blast_growth,
            tuning.blast_hold_ticks,
            caused_by_player,
        )
    }

    /// A blast already at full size, starting its hold
    pub fn at_full_size(mut self) -> Self {
        self.piece.resize_square(self.max_size);
        self.phase = self.after_growth();
        self
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.piece.width
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.piece.center()
    }

    pub fn is_spent(&self) -> bool {
        self.phase == BlastPhase::Spent
    }

    fn after_growth(&self) -> BlastPhase {
        if self.hold_ticks == 0 {
            BlastPhase::Collapsing
        } else {
            BlastPhase::Holding {
                ticks_left: self.hold_ticks,
            }
        }
    }

    /// Advance the lifecycle by one tick
    pub fn step(&mut self) {
        let rate = self.piece.dv;
        match self.phase {
            BlastPhase::Growing => {
                let size = (self.size() + rate).min(self.max_size);
                self.piece.resize_square(size);
                if size >= self.max_size {
                    self.phase = self.after_growth();
                }
            }
            BlastPhase::Holding { ticks_left } => {
                self.phase = if ticks_left <= 1 {
                    BlastPhase::Collapsing
                } else {
                    BlastPhase::Holding {
                        ticks_left: ticks_left - 1,
                    }
                };
            }
            BlastPhase::Collapsing => {
                let size = self.size() - rate;
                if size <= 0.0 {
                    self.piece.resize_square(0.0);
                    self.phase = BlastPhase::Spent;
                } else {
                    self.piece.resize_square(size);
                }
            }
            BlastPhase::Spent => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawns_at_zero_size() {
        let blast = Blast::new(Vec2::new(100.0, 100.0), 40.0, 2.0, 5, true);
        assert_eq!(blast.size(), 0.0);
        assert_eq!(blast.phase, BlastPhase::Growing);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut blast = Blast::new(Vec2::new(100.0, 100.0), 10.0, 5.0, 3, false);
        blast.step();
        assert_eq!(blast.size(), 5.0);
        blast.step();
        assert_eq!(blast.size(), 10.0);
        assert_eq!(blast.phase, BlastPhase::Holding { ticks_left: 3 });
        for _ in 0..3 {
            blast.step();
            assert_eq!(blast.size(), 10.0);
        }
        assert_eq!(blast.phase, BlastPhase::Collapsing);
        blast.step();
        assert_eq!(blast.size(), 5.0);
        blast.step();
        assert!(blast.is_spent());
        assert_eq!(blast.size(), 0.0);
        assert_eq!(blast.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_at_full_size_skips_growth() {
        let blast = Blast::new(Vec2::new(50.0, 60.0), 40.0, 1.0, 25, true).at_full_size();
        assert_eq!(blast.size(), 40.0);
        assert_eq!(blast.piece.x, 30.0);
        assert_eq!(blast.phase, BlastPhase::Holding { ticks_left: 25 });
    }

    #[test]
    fn test_no_hold_collapses_right_away() {
        let mut blast = Blast::new(Vec2::ZERO, 2.0, 2.0, 0, true);
        blast.step();
        assert_eq!(blast.phase, BlastPhase::Collapsing);
        blast.step();
        assert!(blast.is_spent());
    }

    proptest! {
        #[test]
        fn size_grows_holds_then_shrinks(
            max in 1.0f32..80.0, growth in 0.1f32..10.0, hold in 0u32..30,
        ) {
            let mut blast = Blast::new(Vec2::new(200.0, 200.0), max, growth, hold, true);
            let mut ticks = 0;
            while !blast.is_spent() {
                let before = blast.size();
                let phase = blast.phase;
                blast.step();
                match phase {
                    BlastPhase::Growing => prop_assert!(blast.size() > before),
                    BlastPhase::Holding { .. } => prop_assert_eq!(blast.size(), before),
                    BlastPhase::Collapsing => prop_assert!(blast.size() < before),
                    BlastPhase::Spent => unreachable!(),
                }
                ticks += 1;
                prop_assert!(ticks < 10_000);
            }
            prop_assert_eq!(blast.size(), 0.0);
        }
    }
}
