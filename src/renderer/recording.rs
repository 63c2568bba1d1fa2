//! In-memory surface that records every call

use glam::Vec2;

use super::{Surface, TextStyle};
use crate::sim::piece::Color;

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillStyle(Color),
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
}

/// Surface that keeps a log of calls instead of drawing
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    /// Fill style in effect after the last call
    pub fill_style: Option<Color>,
}

impl RecordingSurface {
    /// Forget recorded calls; the current fill style is kept
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Rect { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn set_fill_style(&mut self, color: Color) {
        self.fill_style = Some(color);
        self.calls.push(DrawCall::FillStyle(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(DrawCall::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.calls.push(DrawCall::Circle { center, radius });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            style,
        });
    }
}
