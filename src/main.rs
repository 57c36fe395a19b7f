//! Flappy Web entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, MouseEvent};

    use flappy_web::platform::{FrameLoop, IntervalHandle, WindowViewport};
    use flappy_web::sim::{GameEvent, GamePhase};
    use flappy_web::{ConfigError, Game, GameConfig, Snapshot};

    /// Game session plus the browser callbacks driving it
    struct App {
        game: Game<WindowViewport>,
        frame: Option<FrameLoop>,
        spawn: Option<IntervalHandle>,
        sprite_x: f32,
        sprite_size: (f32, f32),
        pipe_width: f32,
    }

    impl App {
        fn new(seed: u64, config: GameConfig) -> Result<Self, ConfigError> {
            Ok(Self {
                sprite_x: config.sprite_x,
                sprite_size: (config.sprite_width, config.sprite_height),
                pipe_width: config.pipe_width,
                game: Game::new(seed, config, WindowViewport)?,
                frame: None,
                spawn: None,
            })
        }

        fn request_frame(&mut self) {
            if let Some(frame) = self.frame.as_mut() {
                frame.request();
            }
        }

        /// Cancel both callbacks and free their closures (page teardown)
        fn teardown(&mut self) {
            self.frame = None;
            self.spawn = None;
            self.game.stop();
        }
    }

    type SharedApp = Rc<RefCell<App>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Web starting...");

        let config = GameConfig::load();
        let spawn_interval_ms = config.spawn_interval_ms;
        let seed = js_sys::Date::now() as u64;
        let app = match App::new(seed, config) {
            Ok(app) => Rc::new(RefCell::new(app)),
            Err(e) => {
                log::error!("Cannot start game: {}", e);
                return;
            }
        };

        app.borrow_mut().game.start();

        // Frame loop: one closure, re-registered every frame
        {
            let app_cb = app.clone();
            let frame_loop = FrameLoop::new(move |_time: f64| {
                game_loop(&app_cb);
            });
            app.borrow_mut().frame = Some(frame_loop);
        }

        // Spawn timer
        {
            let app_cb = app.clone();
            let handle = IntervalHandle::every(spawn_interval_ms, move || {
                if let Some(event) = app_cb.borrow_mut().game.on_spawn_timer() {
                    log::debug!("{:?}", event);
                }
            });
            app.borrow_mut().spawn = handle;
        }

        setup_input_handlers(app.clone());
        setup_restart_button(app.clone());
        setup_teardown(app.clone());

        app.borrow_mut().request_frame();

        log::info!("Flappy Web running (seed {})", seed);
    }

    fn game_loop(app: &SharedApp) {
        let mut a = app.borrow_mut();
        if let Some(frame) = a.frame.as_mut() {
            frame.fired();
        }

        for event in a.game.on_frame() {
            if let GameEvent::Crashed { cause } = event {
                log::info!("Crashed: {:?}", cause);
            }
        }

        let snapshot = a.game.snapshot();
        render(&a, &snapshot);

        if a.game.frame_loop_armed() {
            a.request_frame();
        }
    }

    fn setup_input_handlers(app: SharedApp) {
        let Some(surface) = document().and_then(|d| d.get_element_by_id("game")) else {
            log::warn!("No #game element; jump input disabled");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().game.jump();
        });
        let _ = surface.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(app: SharedApp) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("restart-btn")) else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            // The button sits on the play surface; don't let the click jump
            event.stop_propagation();

            let mut a = app.borrow_mut();
            if a.game.snapshot().phase != GamePhase::GameOver {
                return;
            }
            a.game.reset();
            // No-op if a frame is still pending
            if a.game.frame_loop_armed() {
                a.request_frame();
            }
            log::info!("Game restarted");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_teardown(app: SharedApp) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().teardown();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    /// Draw the snapshot into the DOM
    fn render(app: &App, snapshot: &Snapshot) {
        let Some(document) = document() else {
            return;
        };
        let game_over = snapshot.phase == GamePhase::GameOver;

        // Sprite (hidden after a crash)
        if let Some(sprite) = html_element(&document, "sprite") {
            let style = sprite.style();
            let _ = style.set_property("left", &format!("{}px", app.sprite_x));
            let _ = style.set_property("top", &format!("{}px", snapshot.sprite_y));
            let _ = style.set_property("width", &format!("{}px", app.sprite_size.0));
            let _ = style.set_property("height", &format!("{}px", app.sprite_size.1));
            let _ = style.set_property("display", if game_over { "none" } else { "block" });
        }

        // Pipes are rebuilt every frame; there are only a handful on screen
        if let Some(pipes) = document.get_element_by_id("pipes") {
            pipes.set_inner_html("");
            for obstacle in &snapshot.obstacles {
                let Some(el) = document
                    .create_element("div")
                    .ok()
                    .and_then(|e| e.dyn_into::<HtmlElement>().ok())
                else {
                    continue;
                };
                let class = if obstacle.is_lower { "pipe lower" } else { "pipe upper" };
                let _ = el.set_attribute("class", class);
                let style = el.style();
                let _ = style.set_property("left", &format!("{}px", obstacle.x));
                let _ = style.set_property("top", &format!("{}px", obstacle.top));
                let _ = style.set_property("width", &format!("{}px", app.pipe_width));
                let _ = style.set_property("height", &format!("{}px", obstacle.height));
                let _ = pipes.append_child(&el);
            }
        }

        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some(&format!("Score: {}", snapshot.score)));
        }

        // Show/hide game over panel
        if let Some(el) = document.get_element_by_id("game-over") {
            if game_over {
                let _ = el.set_attribute("class", "");
                if let Some(score_el) = document.get_element_by_id("final-score") {
                    score_el.set_text_content(Some(&snapshot.score.to_string()));
                }
            } else {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use flappy_web::sim::{FixedViewport, GameEvent};
    use flappy_web::{Game, GameConfig};

    /// 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten minutes of simulated play
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    const VIEWPORT: FixedViewport = FixedViewport::new(800.0, 600.0);

    /// Optional JSON config override from the first CLI argument
    fn load_config() -> GameConfig {
        let Some(path) = std::env::args().nth(1) else {
            return GameConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match GameConfig::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path);
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path, e);
                    GameConfig::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                GameConfig::default()
            }
        }
    }

    /// Headless demo: the autopilot plays one run on a fixed viewport
    pub fn run() {
        let config = load_config();
        let mut game = match Game::new(0x5EED, config, VIEWPORT) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Cannot start demo: {}", e);
                return;
            }
        };
        game.set_autopilot(true);
        game.start();

        let mut frames = 0;
        while game.frame_loop_armed() && frames < MAX_FRAMES {
            let mut events = game.pump(FRAME_MS);
            events.extend(game.on_frame());
            for event in events {
                match event {
                    GameEvent::Scored { score, .. } => log::info!("Score: {}", score),
                    GameEvent::Crashed { cause } => log::info!("Crashed: {:?}", cause),
                    _ => {}
                }
            }
            frames += 1;
        }
        game.stop();

        log::info!("Demo finished after {} frames", frames);
        match game.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Web (native) starting...");
    log::info!("Running headless autopilot demo - build for wasm32 to play in the browser");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
