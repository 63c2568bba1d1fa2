//! Browser 2D canvas backend

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::{Surface, TextStyle};
use crate::sim::piece::Color;

impl Surface for CanvasRenderingContext2d {
    fn set_fill_style(&mut self, color: Color) {
        self.set_fill_style_str(&color.to_string());
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        CanvasRenderingContext2d::fill_rect(self, x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.begin_path();
        if self
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.fill();
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.set_font(&style.font());
        self.set_text_align(style.align.as_str());
        if let Err(e) = CanvasRenderingContext2d::fill_text(self, text, x as f64, y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}
