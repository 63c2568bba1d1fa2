//! Player-owned ground installations: batteries and cities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};
use super::projectile::{Projectile, Side};
use crate::consts::*;
use crate::error::GameError;

/// A missile battery with a finite magazine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emplacement {
    pub piece: Piece,
    pub missile_count: u32,
    pub destroyed: bool,
}

impl Emplacement {
    pub fn new(x: f32, y: f32, width: f32, height: f32, missile_count: u32) -> Self {
        Self {
            piece: Piece::new(x, y, width, height, Color::BATTERY),
            missile_count,
            destroyed: false,
        }
    }

    /// Where interceptors leave the battery (top centre)
    pub fn launch_point(&self) -> Vec2 {
        Vec2::new(self.piece.x + self.piece.width / 2.0, self.piece.y)
    }

    pub fn can_fire(&self) -> bool {
        !self.destroyed && self.missile_count > 0
    }

    /// Launch one interceptor toward `target`
    pub fn fire(&mut self, target: Vec2, speed: f32) -> Result<Projectile, GameError> {
        if !self.can_fire() {
            return Err(GameError::OutOfAmmo);
        }
        if !target.is_finite() {
            return Err(GameError::InvalidDestination);
        }
        self.missile_count -= 1;
        Ok(Projectile::new(self.launch_point(), target, speed, Side::Player))
    }

    /// Mark destroyed; the magazine goes with it
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.missile_count = 0;
    }
}

/// A defended city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    pub piece: Piece,
    pub destroyed: bool,
}

impl Settlement {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            piece: Piece::new(x, y, width, height, Color::CITY),
            destroyed: false,
        }
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// Batteries spread across the ground line: the outer two sit
/// `EMPLACEMENT_MARGIN` from the edges, the rest evenly between them.
pub fn layout_emplacements(count: usize, missiles_each: u32) -> Vec<Emplacement> {
    let y = ARENA_HEIGHT - EMPLACEMENT_HEIGHT;
    let centers: Vec<f32> = match count {
        0 => Vec::new(),
        1 => vec![ARENA_WIDTH / 2.0],
        _ => {
            let span = ARENA_WIDTH - 2.0 * EMPLACEMENT_MARGIN;
            (0..count)
                .map(|i| EMPLACEMENT_MARGIN + span * i as f32 / (count - 1) as f32)
                .collect()
        }
    };

    centers
        .into_iter()
        .map(|cx| {
            Emplacement::new(
                cx - EMPLACEMENT_WIDTH / 2.0,
                y,
                EMPLACEMENT_WIDTH,
                EMPLACEMENT_HEIGHT,
                missiles_each,
            )
        })
        .collect()
}

/// Cities share out the gaps between batteries, leftmost gaps first,
/// and sit evenly spaced within their gap.
pub fn layout_settlements(count: usize, emplacements: &[Emplacement]) -> Vec<Settlement> {
    if count == 0 {
        return Vec::new();
    }

    // Horizontal free intervals along the ground line
    let mut gaps: Vec<(f32, f32)> = emplacements
        .windows(2)
        .map(|pair| {
            let left = &pair[0].piece;
            let right = &pair[1].piece;
            (left.x + left.width, right.x)
        })
        .collect();
    if gaps.is_empty() {
        match emplacements.first() {
            Some(only) => {
                gaps.push((0.0, only.piece.x));
                gaps.push((only.piece.x + only.piece.width, ARENA_WIDTH));
            }
            None => gaps.push((0.0, ARENA_WIDTH)),
        }
    }

    let per_gap = count / gaps.len();
    let extra = count % gaps.len();
    let y = ARENA_HEIGHT - SETTLEMENT_HEIGHT;

    let mut settlements = Vec::with_capacity(count);
    for (i, &(start, end)) in gaps.iter().enumerate() {
        let n = per_gap + usize::from(i < extra);
        let spacing = (end - start) / (n + 1) as f32;
        for k in 0..n {
            let cx = start + spacing * (k + 1) as f32;
            settlements.push(Settlement::new(
                cx - SETTLEMENT_WIDTH / 2.0,
                y,
                SETTLEMENT_WIDTH,
                SETTLEMENT_HEIGHT,
            ));
        }
    }
    settlements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_decrements_until_empty() {
        let mut battery = Emplacement::new(270.0, 490.0, 60.0, 60.0, 3);
        for expected in [2, 1, 0] {
            let missile = battery.fire(Vec2::new(300.0, 100.0), 8.0).unwrap();
            assert_eq!(missile.origin, Vec2::new(300.0, 490.0));
            assert_eq!(missile.side, Side::Player);
            assert_eq!(battery.missile_count, expected);
        }
        assert_eq!(battery.fire(Vec2::new(300.0, 100.0), 8.0).unwrap_err(), GameError::OutOfAmmo);
        assert_eq!(battery.missile_count, 0);
    }

    #[test]
    fn test_destroyed_battery_cannot_fire() {
        let mut battery = Emplacement::new(0.0, 490.0, 60.0, 60.0, 10);
        battery.destroy();
        assert_eq!(battery.missile_count, 0);
        assert!(battery.fire(Vec2::new(10.0, 10.0), 8.0).is_err());
    }

    #[test]
    fn test_non_finite_target_is_rejected_without_spending() {
        let mut battery = Emplacement::new(0.0, 490.0, 60.0, 60.0, 10);
        let result = battery.fire(Vec2::new(f32::NAN, 10.0), 8.0);
        assert_eq!(result.unwrap_err(), GameError::InvalidDestination);
        assert_eq!(battery.missile_count, 10);
    }

    #[test]
    fn test_default_layout() {
        let batteries = layout_emplacements(3, 10);
        let launch: Vec<Vec2> = batteries.iter().map(|b| b.launch_point()).collect();
        assert_eq!(
            launch,
            vec![Vec2::new(30.0, 490.0), Vec2::new(300.0, 490.0), Vec2::new(570.0, 490.0)]
        );

        let cities = layout_settlements(6, &batteries);
        assert_eq!(cities.len(), 6);
        // Three cities in each gap, none overlapping a battery or each other
        for city in &cities {
            assert!(batteries.iter().all(|b| !b.piece.is_colliding_with(&city.piece)));
        }
        for (i, a) in cities.iter().enumerate() {
            for b in &cities[i + 1..] {
                assert!(!a.piece.is_colliding_with(&b.piece));
            }
        }
        assert!(cities[..3].iter().all(|c| c.piece.center().x < 300.0));
        assert!(cities[3..].iter().all(|c| c.piece.center().x > 300.0));
    }

    #[test]
    fn test_single_battery_layout_splits_cities_around_it() {
        let batteries = layout_emplacements(1, 5);
        assert_eq!(batteries[0].launch_point().x, ARENA_WIDTH / 2.0);
        let cities = layout_settlements(3, &batteries);
        assert_eq!(cities.len(), 3);
        assert_eq!(cities.iter().filter(|c| c.piece.center().x < 300.0).count(), 2);
    }
}
