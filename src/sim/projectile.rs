//! Straight-line missiles
//!
//! A projectile travels from its origin to a fixed destination at constant
//! speed. The number of ticks is fixed at launch (`ceil(distance / speed)`)
//! and the final step snaps onto the destination, so arrival is exact and
//! never oscillates around the target point.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, PROJECTILE_SIZE};

/// Slowest speed a projectile may be built with (pixels per tick)
pub const MIN_SPEED: f32 = 0.01;

/// How far outside the arena a projectile may stray before it is culled
pub const OUT_OF_PLAY_MARGIN: f32 = 50.0;

/// Which side launched a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn color(&self) -> Color {
        match self {
            Side::Player => Color::PLAYER_MISSILE,
            Side::Enemy => Color::ENEMY_MISSILE,
        }
    }
}

/// A missile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub piece: Piece,
    pub origin: Vec2,
    pub destination: Vec2,
    pub side: Side,
    /// Ticks left until arrival (0 = arrived)
    steps_remaining: u32,
}

impl Projectile {
    /// Launch from `origin` toward `destination`.
    ///
    /// A destination equal to the origin arrives immediately.
    pub fn new(origin: Vec2, destination: Vec2, speed: f32, side: Side) -> Self {
        let speed = speed.max(MIN_SPEED);
        let path = destination - origin;
        let distance = path.length();

        let (velocity, steps) = if distance <= f32::EPSILON {
            (Vec2::ZERO, 0)
        } else {
            let steps = (distance / speed).ceil() as u32;
            (path / distance * speed, steps.max(1))
        };

        let piece = Piece::centered(origin, PROJECTILE_SIZE, side.color())
            .with_velocity(velocity.x, velocity.y);

        Self {
            piece,
            origin,
            destination,
            side,
            steps_remaining: steps,
        }
    }

    /// Current head position
    #[inline]
    pub fn head(&self) -> Vec2 {
        self.piece.center()
    }

    /// Advance one tick, landing exactly on the destination on the last step
    pub fn advance(&mut self) {
        match self.steps_remaining {
            0 => {}
            1 => {
                self.piece.set_center(self.destination);
                self.steps_remaining = 0;
            }
            _ => {
                self.piece.move_step();
                self.steps_remaining -= 1;
            }
        }
    }

    pub fn has_arrived(&self) -> bool {
        self.steps_remaining == 0
    }

    pub fn steps_remaining(&self) -> u32 {
        self.steps_remaining
    }

    /// Signed distance left along the travel direction (<= 0 once reached)
    pub fn remaining_distance(&self) -> f32 {
        let dir = Vec2::new(self.piece.dx, self.piece.dy).normalize_or_zero();
        (self.destination - self.head()).dot(dir)
    }

    /// True once the head has wandered well outside the arena
    pub fn is_out_of_play(&self) -> bool {
        let head = self.head();
        head.x < -OUT_OF_PLAY_MARGIN
            || head.x > ARENA_WIDTH + OUT_OF_PLAY_MARGIN
            || head.y < -OUT_OF_PLAY_MARGIN
            || head.y > ARENA_HEIGHT + OUT_OF_PLAY_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ticks_until_arrival(projectile: &mut Projectile) -> u32 {
        let mut ticks = 0;
        while !projectile.has_arrived() {
            projectile.advance();
            ticks += 1;
            assert!(ticks < 100_000, "projectile never arrived");
        }
        ticks
    }

    #[test]
    fn test_velocity_points_at_destination() {
        let p = Projectile::new(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0), 5.0, Side::Player);
        assert!((p.piece.dx - 3.0).abs() < 1e-5);
        assert!((p.piece.dy - 4.0).abs() < 1e-5);
        assert_eq!(p.steps_remaining(), 10);
    }

    #[test]
    fn test_vertical_flight_takes_ceil_ticks() {
        for speed in [1.0, 3.0, 7.0, 8.0, 499.0] {
            let mut p = Projectile::new(Vec2::ZERO, Vec2::new(0.0, 500.0), speed, Side::Enemy);
            let expected = (500.0f32 / speed).ceil() as u32;
            assert_eq!(ticks_until_arrival(&mut p), expected, "speed {speed}");
            assert_eq!(p.head(), Vec2::new(0.0, 500.0));
        }
    }

    #[test]
    fn test_zero_length_path_arrives_immediately() {
        let here = Vec2::new(120.0, 80.0);
        let mut p = Projectile::new(here, here, 8.0, Side::Player);
        assert!(p.has_arrived());
        p.advance();
        assert_eq!(p.head(), here);
    }

    #[test]
    fn test_advance_after_arrival_is_stationary() {
        let mut p = Projectile::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 4.0, Side::Player);
        ticks_until_arrival(&mut p);
        p.advance();
        assert_eq!(p.head(), Vec2::new(10.0, 0.0));
        assert!(p.remaining_distance().abs() < 1e-4);
    }

    #[test]
    fn test_out_of_play() {
        let mut p = Projectile::new(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0), 1.0, Side::Enemy);
        assert!(!p.is_out_of_play());
        p.piece.set_center(Vec2::new(-100.0, 10.0));
        assert!(p.is_out_of_play());
    }

    proptest! {
        #[test]
        fn never_overshoots_destination(
            dx in -400.0f32..400.0, dy in 1.0f32..500.0, speed in 0.5f32..20.0,
        ) {
            let dest = Vec2::new(dx, dy);
            let mut p = Projectile::new(Vec2::ZERO, dest, speed, Side::Enemy);
            let total = p.steps_remaining();
            for _ in 0..total {
                prop_assert!(p.remaining_distance() > -speed);
                p.advance();
            }
            prop_assert!(p.has_arrived());
            prop_assert!((p.head() - dest).length() < 1e-3);
        }
    }
}
