//! Multiverse Drift entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use multiverse_drift::consts::*;
    use multiverse_drift::renderer::CanvasRenderer;
    use multiverse_drift::sim::{tick, GameEvent, GamePhase, GameState, TickInput};
    use multiverse_drift::Settings;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, width: f32, height: f32) -> Self {
            Self {
                state: GameState::new(seed, width, height),
                renderer: None,
                settings: Settings::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run fixed-step simulation ticks from accumulated wall time
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.render(&self.state, &self.settings);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        // Missing HUD nodes degrade to a no-op; the loop must keep running
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if hidden { "hidden" } else { "" };
            let _ = el.set_attribute("class", class);
        }
    }

    /// Push read-only state projections into the HUD and menus
    fn update_hud(game: &mut Game) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let state = &game.state;
        set_text(&document, "score", &format!("Score: {}", state.score));
        set_text(&document, "time", &format!("Time: {}", state.elapsed_secs()));
        set_text(&document, "life", &format!("Life: {}", state.life.display()));
        set_text(
            &document,
            "universe",
            &format!(
                "Universe: {}/{}",
                state.multiverse.current_universe, state.multiverse.max_universes
            ),
        );
        set_text(
            &document,
            "game-speed",
            &format!("Speed: x{:.1}", state.game_speed),
        );
        if game.settings.show_fps {
            set_text(&document, "fps", &format!("FPS: {}", game.fps));
        }

        // Menu overlay follows the phase
        match state.phase {
            GamePhase::Menu => {
                set_hidden(&document, "menu-overlay", false);
                set_hidden(&document, "start-menu", false);
                set_hidden(&document, "game-over-menu", true);
            }
            GamePhase::Playing => {
                set_hidden(&document, "menu-overlay", true);
            }
            GamePhase::GameOver => {
                set_hidden(&document, "menu-overlay", false);
                set_hidden(&document, "start-menu", true);
                set_hidden(&document, "game-over-menu", false);
                set_text(
                    &document,
                    "final-score",
                    &format!("Final score: {}", state.score),
                );
            }
        }

        // Drain discrete events into host-side notifications
        for event in game.state.events.drain(..) {
            match event {
                GameEvent::UniverseSwitched { universe } => {
                    show_transition_message(&document, universe);
                }
                GameEvent::GameOver { final_score } => {
                    log::info!("run ended with score {final_score}");
                }
                _ => {}
            }
        }
    }

    /// Transient "entering universe N" banner, removed after 2 seconds
    fn show_transition_message(document: &Document, universe: u32) {
        let Ok(message) = document.create_element("div") else {
            return;
        };
        let _ = message.set_attribute("class", "universe-transition-message");
        message.set_text_content(Some(&format!("Entering parallel universe {universe}")));
        if let Some(body) = document.body() {
            let _ = body.append_child(&message);
        }

        let remove = Closure::once(move || {
            message.remove();
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.as_ref().unchecked_ref(),
                2000,
            );
        }
        remove.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Multiverse Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Canvas fills the viewport
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, width as f32, height as f32)));
        log::info!("Game initialized with seed: {}", seed);

        // Canvas 2D context; without one the game still runs headless
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok());
        match ctx {
            Some(ctx) => game.borrow_mut().renderer = Some(CanvasRenderer::new(ctx)),
            None => log::warn!("no 2d context available, running without display"),
        }

        setup_keyboard(game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(canvas.clone(), game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Multiverse Drift running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down sets held intents (effective only while Playing)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase != GamePhase::Playing {
                    return;
                }
                match event.key().as_str() {
                    "ArrowUp" | "w" | "W" => g.input.thrusting = true,
                    "ArrowLeft" | "a" | "A" => g.input.rotating_left = true,
                    "ArrowRight" | "d" | "D" => g.input.rotating_right = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up always clears, so intents cannot stick across phases
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" | "w" | "W" => g.input.thrusting = false,
                    "ArrowLeft" | "a" | "A" => g.input.rotating_left = false,
                    "ArrowRight" | "d" | "D" => g.input.rotating_right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        // Start and restart are the same full-reset transition
        for id in ["start-button", "restart-button"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().input.start = true;
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            // Surface bounds are live inputs to the simulation
            game.borrow_mut()
                .state
                .set_surface_size(width as f32, height as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            update_hud(&mut g);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use multiverse_drift::consts::SIM_DT;
    use multiverse_drift::sim::{tick, GameState, TickInput};

    env_logger::init();
    log::info!("Multiverse Drift (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Short headless demo: thrust across universe 1 for ten seconds
    let mut state = GameState::new(0xC0FFEE, 800.0, 600.0);
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &start);

    let input = TickInput {
        thrusting: true,
        ..Default::default()
    };
    for _ in 0..(10.0 / SIM_DT) as u32 {
        tick(&mut state, &input);
    }

    println!(
        "after 10s: universe {}/{}, score {}, life {}, pos ({:.0}, {:.0})",
        state.multiverse.current_universe,
        state.multiverse.max_universes,
        state.score,
        state.life.display(),
        state.player.pos.x,
        state.player.pos.y,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
