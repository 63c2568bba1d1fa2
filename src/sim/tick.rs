//! Per-frame simulation tick
//!
//! The host calls `tick` once per display frame. One tick runs to completion:
//! move, detonate arrivals, resolve blasts, cull, check end conditions, then
//! hand the result to the drawing surface.

use glam::Vec2;

use super::collision::{
    explosion_detection_emplacements, explosion_detection_projectiles,
    explosion_detection_settlements, objective_detection,
};
use super::state::{GamePhase, GameState};
use crate::renderer::{Surface, draw_scene};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire an interceptor at this arena point (click/tap)
    pub fire_at: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Throw the current run away and start over
    pub new_game: bool,
}

/// Advance the simulation one tick and draw the result
pub fn tick<S: Surface + ?Sized>(state: &mut GameState, input: &TickInput, surface: &mut S) {
    step(state, input);
    draw_scene(state, surface);
}

/// Advance the simulation one tick without drawing
pub fn step(state: &mut GameState, input: &TickInput) {
    if input.new_game {
        state.new_game();
    }

    if input.pause {
        state.toggle_pause();
    }

    if let Some(point) = input.fire_at {
        if let Err(err) = state.resolve_player_input(point) {
            log::debug!("Ignored fire at ({:.0}, {:.0}): {}", point.x, point.y, err);
        }
    }

    // Don't tick if paused
    if state.paused {
        return;
    }

    match state.phase {
        GamePhase::Setup | GamePhase::GameOver => {}

        GamePhase::LevelCleared { breather_ticks } => {
            state.time_ticks += 1;
            let remaining = breather_ticks.saturating_sub(1);
            if remaining == 0 {
                state.start_level();
            } else {
                state.phase = GamePhase::LevelCleared {
                    breather_ticks: remaining,
                };
            }
        }

        GamePhase::Playing => {
            state.time_ticks += 1;
            simulate(state);

            if state.settlements.is_empty() {
                state.end_game();
            } else if state.enemy_missiles.is_empty() && state.blasts.is_empty() {
                state.complete_level();
            }
        }
    }
}

/// Motion, detonation and destruction for one playing tick
fn simulate(state: &mut GameState) {
    for missile in state
        .player_missiles
        .iter_mut()
        .chain(state.enemy_missiles.iter_mut())
    {
        missile.advance();
    }
    for blast in &mut state.blasts {
        blast.step();
    }

    objective_detection(&mut state.player_missiles, &mut state.blasts, &state.tuning);
    objective_detection(&mut state.enemy_missiles, &mut state.blasts, &state.tuning);

    let report =
        explosion_detection_projectiles(&mut state.blasts, &mut state.enemy_missiles, &state.tuning);
    state.score += report.destroyed as u64 * state.tuning.points_per_missile;
    if report.destroyed > 0 {
        log::debug!("Intercepted {} enemy missiles", report.destroyed);
    }

    let cities_lost = explosion_detection_settlements(&state.blasts, &mut state.settlements);
    let batteries_lost = explosion_detection_emplacements(&state.blasts, &mut state.emplacements);
    if cities_lost > 0 || batteries_lost > 0 {
        log::info!("Lost {} cities and {} batteries", cities_lost, batteries_lost);
    }

    state.cull();
}
