//! Base rectangular entity shared by every simulated object
//!
//! Position is the top-left corner in arena coordinates. Specialised
//! entities embed a `Piece` and add their own payload.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An RGB fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const CITY: Color = Color::rgb(0, 150, 255);
    pub const BATTERY: Color = Color::rgb(200, 200, 0);
    pub const PLAYER_MISSILE: Color = Color::rgb(0, 255, 0);
    pub const ENEMY_MISSILE: Color = Color::rgb(255, 0, 0);
    pub const EXPLOSION: Color = Color::rgb(255, 100, 0);
}

/// Canvas-style rendering, e.g. `rgb(255, 100, 0)`
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A moving or stationary axis-aligned rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Per-tick horizontal delta
    pub dx: f32,
    /// Per-tick vertical delta
    pub dy: f32,
    /// Auxiliary rate (blast growth); unused by static pieces
    pub dv: f32,
}

impl Piece {
    /// A stationary piece
    pub fn new(x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            color,
            dx: 0.0,
            dy: 0.0,
            dv: 0.0,
        }
    }

    /// A square of side `size` centred on `center`
    pub fn centered(center: Vec2, size: f32, color: Color) -> Self {
        let size = size.max(0.0);
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size, color)
    }

    pub fn with_velocity(mut self, dx: f32, dy: f32) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    /// Advance one tick. No bounds clamping; owners cull what leaves play.
    #[inline]
    pub fn move_step(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Move so the rectangle is centred on `center`, keeping its size
    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    /// Resize to a `size` square, keeping the centre fixed
    pub fn resize_square(&mut self, size: f32) {
        let center = self.center();
        self.width = size.max(0.0);
        self.height = size.max(0.0);
        self.set_center(center);
    }

    /// Axis-aligned overlap test on half-open ranges `[x, x+width)`.
    ///
    /// Touching edges and zero-sized rectangles never collide.
    pub fn is_colliding_with(&self, other: &Piece) -> bool {
        let overlap_x = self.x.max(other.x) < (self.x + self.width).min(other.x + other.width);
        let overlap_y = self.y.max(other.y) < (self.y + self.height).min(other.y + other.height);
        overlap_x && overlap_y
    }
}

/// Anything that occupies a rectangle in the arena
pub trait Entity {
    fn piece(&self) -> &Piece;

    fn overlaps<T: Entity>(&self, other: &T) -> bool {
        self.piece().is_colliding_with(other.piece())
    }
}

impl Entity for Piece {
    fn piece(&self) -> &Piece {
        self
    }
}
