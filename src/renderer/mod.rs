//! Drawing-surface abstraction
//!
//! The simulation never draws. After each tick the host hands the state to
//! `draw_scene`, which issues fill calls against whatever `Surface` it has: a
//! browser 2D canvas on wasm32, or a `RecordingSurface` in tests and the
//! headless runner.

#[cfg(target_arch = "wasm32")]
mod canvas;
pub mod recording;

pub use recording::{DrawCall, RecordingSurface};

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::piece::{Color, Piece};
use crate::sim::state::{GamePhase, GameState};

/// Horizontal anchoring of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Canvas `textAlign` value
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font size and anchoring for `fill_text`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub align: TextAlign,
}

impl TextStyle {
    pub const HUD: TextStyle = TextStyle {
        size: 16.0,
        align: TextAlign::Left,
    };
    pub const BANNER: TextStyle = TextStyle {
        size: 40.0,
        align: TextAlign::Center,
    };

    pub fn aligned(self, align: TextAlign) -> Self {
        Self { align, ..self }
    }

    /// Canvas `font` value
    pub fn font(&self) -> String {
        format!("{}px monospace", self.size)
    }
}

/// Anything that can fill shapes in arena coordinates
pub trait Surface {
    fn set_fill_style(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
}

/// HUD baseline, a little below the top edge
const HUD_Y: f32 = 20.0;
const HUD_MARGIN: f32 = 10.0;

/// Draw a full frame, HUD included
pub fn draw_scene<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    draw_frame(state, surface, true);
}

/// Draw a full frame.
///
/// Order is fixed: background, cities, batteries, player missiles, enemy
/// missiles, blasts, HUD, banners. Text always comes last so the final
/// fill style is the text color.
pub fn draw_frame<S: Surface + ?Sized>(state: &GameState, surface: &mut S, show_hud: bool) {
    surface.set_fill_style(Color::BLACK);
    surface.fill_rect(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT);

    for city in &state.settlements {
        fill_piece(surface, &city.piece);
    }
    for battery in &state.emplacements {
        fill_piece(surface, &battery.piece);
    }
    for missile in &state.player_missiles {
        fill_piece(surface, &missile.piece);
    }
    for missile in &state.enemy_missiles {
        fill_piece(surface, &missile.piece);
    }
    for blast in state.blasts.iter().filter(|b| b.size() > 0.0) {
        surface.set_fill_style(blast.piece.color);
        surface.fill_circle(blast.center(), blast.size() / 2.0);
    }

    if show_hud {
        draw_hud(state, surface);
    }
    draw_banners(state, surface);
}

fn fill_piece<S: Surface + ?Sized>(surface: &mut S, piece: &Piece) {
    surface.set_fill_style(piece.color);
    surface.fill_rect(piece.x, piece.y, piece.width, piece.height);
}

/// Score, level, stock and the record to beat
pub fn draw_hud<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.set_fill_style(Color::WHITE);
    surface.fill_text(
        &format!("SCORE {}", state.score),
        HUD_MARGIN,
        HUD_Y,
        TextStyle::HUD,
    );
    surface.fill_text(
        &format!("LEVEL {}", state.level),
        ARENA_WIDTH / 2.0,
        HUD_Y,
        TextStyle::HUD.aligned(TextAlign::Center),
    );
    surface.fill_text(
        &format!("MISSILES {}", state.player_missile_count),
        ARENA_WIDTH - HUD_MARGIN,
        HUD_Y,
        TextStyle::HUD.aligned(TextAlign::Right),
    );
    surface.fill_text(
        &format!(
            "HIGH {} {} (L{})",
            state.high_score.player_name, state.high_score.score, state.high_score.level
        ),
        HUD_MARGIN,
        HUD_Y * 2.0,
        TextStyle::HUD,
    );
}

/// Phase and pause banners across the middle of the arena
pub fn draw_banners<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    let mid = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);

    match state.phase {
        GamePhase::GameOver => {
            surface.set_fill_style(Color::RED);
            surface.fill_text("GAME OVER", mid.x, mid.y, TextStyle::BANNER);
            if state.new_high_score {
                surface.fill_text(
                    "NEW HIGH SCORE",
                    mid.x,
                    mid.y + TextStyle::BANNER.size,
                    TextStyle::HUD.aligned(TextAlign::Center),
                );
            }
            return;
        }
        GamePhase::Setup => {
            surface.set_fill_style(Color::WHITE);
            surface.fill_text("PRESS N TO START", mid.x, mid.y, TextStyle::BANNER);
        }
        GamePhase::LevelCleared { .. } => {
            surface.set_fill_style(Color::WHITE);
            surface.fill_text(
                &format!("LEVEL {}", state.level),
                mid.x,
                mid.y,
                TextStyle::BANNER,
            );
        }
        GamePhase::Playing => {}
    }

    if state.paused {
        surface.set_fill_style(Color::WHITE);
        surface.fill_text(
            "PAUSED",
            mid.x,
            mid.y + TextStyle::BANNER.size,
            TextStyle::BANNER,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::blast::Blast;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.new_game();
        state
    }

    /// Index of the first call that sets `color` after `from`
    fn style_index(surface: &RecordingSurface, color: Color, from: usize) -> Option<usize> {
        surface.calls[from..]
            .iter()
            .position(|c| *c == DrawCall::FillStyle(color))
            .map(|i| i + from)
    }

    #[test]
    fn test_background_first() {
        let state = playing(1);
        let mut surface = RecordingSurface::default();
        draw_scene(&state, &mut surface);
        assert_eq!(surface.calls[0], DrawCall::FillStyle(Color::BLACK));
        assert_eq!(
            surface.calls[1],
            DrawCall::Rect {
                x: 0.0,
                y: 0.0,
                width: ARENA_WIDTH,
                height: ARENA_HEIGHT
            }
        );
    }

    #[test]
    fn test_draw_order() {
        let mut state = playing(2);
        state.resolve_player_input(Vec2::new(300.0, 100.0)).unwrap();
        state
            .blasts
            .push(Blast::new(Vec2::new(100.0, 100.0), 40.0, 1.0, 5, true).at_full_size());

        let mut surface = RecordingSurface::default();
        draw_scene(&state, &mut surface);

        let city = style_index(&surface, Color::CITY, 0).unwrap();
        let battery = style_index(&surface, Color::BATTERY, city).unwrap();
        let player = style_index(&surface, Color::PLAYER_MISSILE, battery).unwrap();
        let enemy = style_index(&surface, Color::ENEMY_MISSILE, player).unwrap();
        let blast = style_index(&surface, Color::EXPLOSION, enemy).unwrap();
        let hud = style_index(&surface, Color::WHITE, blast).unwrap();
        assert!(city < battery && battery < player && player < enemy && enemy < blast && blast < hud);

        assert_eq!(surface.rects().count(), 1 + 6 + 3 + 1 + 10);
        assert_eq!(surface.circles().count(), 1);
    }

    #[test]
    fn test_hud_text_is_white_and_last() {
        let state = playing(3);
        let mut surface = RecordingSurface::default();
        draw_scene(&state, &mut surface);
        assert_eq!(surface.fill_style, Some(Color::WHITE));
        let texts: Vec<&str> = surface.texts().collect();
        assert!(texts.contains(&"SCORE 0"));
        assert!(texts.contains(&"LEVEL 1"));
        assert!(texts.contains(&"MISSILES 30"));
        assert!(matches!(surface.calls.last(), Some(DrawCall::Text { .. })));
    }

    #[test]
    fn test_hud_can_be_hidden() {
        let state = playing(3);
        let mut surface = RecordingSurface::default();
        draw_frame(&state, &mut surface, false);
        assert_eq!(surface.texts().count(), 0);
    }

    #[test]
    fn test_game_over_banner_is_red() {
        let mut state = playing(4);
        state.settlements.clear();
        state.score = 10;
        state.end_game();

        let mut surface = RecordingSurface::default();
        draw_scene(&state, &mut surface);
        assert_eq!(surface.fill_style, Some(Color::RED));
        let texts: Vec<&str> = surface.texts().collect();
        assert!(texts.contains(&"GAME OVER"));
        assert!(texts.contains(&"NEW HIGH SCORE"));
    }

    #[test]
    fn test_paused_banner() {
        let mut state = playing(5);
        state.toggle_pause();
        let mut surface = RecordingSurface::default();
        draw_scene(&state, &mut surface);
        assert!(surface.texts().any(|t| t == "PAUSED"));
        assert_eq!(surface.fill_style, Some(Color::WHITE));
    }

    #[test]
    fn test_zero_size_blast_not_drawn() {
        let mut state = playing(6);
        state
            .blasts
            .push(Blast::new(Vec2::new(100.0, 100.0), 40.0, 1.0, 5, true));
        let mut surface = RecordingSurface::default();
        draw_scene(&state, &mut surface);
        assert_eq!(surface.circles().count(), 0);
    }

    #[test]
    fn test_text_style() {
        assert_eq!(TextStyle::BANNER.font(), "40px monospace");
        assert_eq!(TextStyle::HUD.aligned(TextAlign::Right).align.as_str(), "right");
    }
}
