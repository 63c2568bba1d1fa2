//! Silo Defense entry point
//!
//! Runs the canvas game loop in the browser, or a headless autoplay game
//! natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use silo_defense::consts::*;
    use silo_defense::renderer::draw_frame;
    use silo_defense::sim::{GamePhase, GameState, TickInput, step};
    use silo_defense::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        input: TickInput,
        /// Canvas pixels per arena unit
        scale: (f32, f32),
        last_phase: GamePhase,
    }

    impl Game {
        fn new(ctx: CanvasRenderingContext2d, settings: Settings) -> Self {
            let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
            let mut state = GameState::with_tuning(seed, settings.tuning());
            state.player_name = settings.player_name.clone();
            state.high_score = HighScore::load();
            let last_phase = state.phase;
            Self {
                state,
                settings,
                ctx,
                input: TickInput::default(),
                scale: (1.0, 1.0),
                last_phase,
            }
        }

        /// Convert a CSS-pixel click position to arena coordinates
        fn to_arena(&self, x: f32, y: f32) -> Vec2 {
            Vec2::new(x / self.scale.0, y / self.scale.1)
        }

        /// Switch to the next difficulty preset and start a fresh game with it
        fn change_difficulty(&mut self) {
            let difficulty = self.settings.cycle_difficulty();
            self.settings.save();

            let high_score = std::mem::take(&mut self.state.high_score);
            let seed = self.settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
            self.state = GameState::with_tuning(seed, self.settings.tuning());
            self.state.player_name = self.settings.player_name.clone();
            self.state.high_score = high_score;
            self.last_phase = self.state.phase;
            self.input = TickInput {
                new_game: true,
                ..Default::default()
            };
            log::info!("Difficulty set to {}", difficulty.as_str());
        }

        /// One simulation tick and one frame
        fn frame(&mut self) {
            let input = std::mem::take(&mut self.input);
            step(&mut self.state, &input);
            draw_frame(&self.state, &mut self.ctx, self.settings.show_hud);

            let phase = self.state.phase;
            if phase != self.last_phase {
                if phase == GamePhase::GameOver && self.state.new_high_score {
                    self.state.high_score.save();
                }
                self.last_phase = phase;
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Silo Defense starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(ctx, settings)));
        log::info!("Game initialized with seed: {}", game.borrow().state.seed);

        setup_input_handlers(&canvas, game.clone())?;
        request_animation_frame(game);

        log::info!("Silo Defense running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Click fires from the nearest loaded battery
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let w = canvas_clone.client_width().max(1) as f32;
                let h = canvas_clone.client_height().max(1) as f32;
                g.scale = (w / ARENA_WIDTH, h / ARENA_HEIGHT);
                let point = g.to_arena(event.offset_x() as f32, event.offset_y() as f32);
                g.input.fire_at = Some(point);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "p" | "P" | "Escape" => g.input.pause = true,
                    "n" | "N" => g.input.new_game = true,
                    "d" | "D" => g.change_difficulty(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Silo Defense (native) starting...");

    let settings = silo_defense::Settings::load();
    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let tuning = settings.tuning_from_json(&json)?;
            log::info!(
                "Loaded tuning from {} ({} preset applied)",
                path,
                settings.difficulty.as_str()
            );
            tuning
        }
        None => settings.tuning(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let state = autoplay::run(seed, tuning, &settings.player_name);
    log::info!(
        "Autoplay finished: level {}, score {}, {} ticks",
        state.level,
        state.score,
        state.time_ticks
    );
    if state.new_high_score {
        state.high_score.save();
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless self-playing game for native runs
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use glam::Vec2;

    use silo_defense::HighScore;
    use silo_defense::renderer::RecordingSurface;
    use silo_defense::sim::{GameState, TickInput, tick};
    use silo_defense::tuning::Tuning;

    /// Stop after this level even if cities survive
    const LEVEL_LIMIT: u32 = 10;
    /// Hard stop for runs that never end
    const TICK_LIMIT: u64 = 200_000;

    pub fn run(seed: u64, tuning: Tuning, player_name: &str) -> GameState {
        let mut state = GameState::with_tuning(seed, tuning);
        state.player_name = player_name.to_string();
        state.high_score = HighScore::load();

        let mut surface = RecordingSurface::default();
        let mut input = TickInput {
            new_game: true,
            ..Default::default()
        };

        while !state.is_game_over() && state.level <= LEVEL_LIMIT && state.time_ticks < TICK_LIMIT {
            surface.clear();
            tick(&mut state, &input, &mut surface);
            input = TickInput {
                fire_at: choose_target(&state),
                ..Default::default()
            };
        }

        if !state.is_game_over() {
            log::info!("Stopped at level {} with cities standing", state.level);
        }
        state
    }

    /// Lead the enemy missile closest to the ground, one shot in the air at a time
    fn choose_target(state: &GameState) -> Option<Vec2> {
        if !state.player_missiles.is_empty() {
            return None;
        }
        let target = state
            .enemy_missiles
            .iter()
            .max_by(|a, b| a.head().y.total_cmp(&b.head().y))?;
        let battery = state.nearest_emplacement(target.head().x)?;

        let launch = state.emplacements[battery].launch_point();
        let velocity = Vec2::new(target.piece.dx, target.piece.dy);
        let flight = (target.head() - launch).length() / state.tuning.player_speed;
        let lead = (target.steps_remaining() as f32).min(flight);
        Some(target.head() + velocity * lead)
    }

}
