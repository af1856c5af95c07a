//! Basket Catch entry point
//!
//! On the web this wires the DOM, input events and the browser scheduler to a
//! `GameLoop` and starts it. Natively it plays one headless round in virtual
//! time with a scripted player and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{MouseEvent, TouchEvent};

    use basket_catch::input::JointSample;
    use basket_catch::platform::browser::{BrowserGame, BrowserScheduler};
    use basket_catch::sim::InputMode;
    use basket_catch::view::dom::DomPresenter;
    use basket_catch::{GameLoop, Settings, Viewport};

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<BrowserGame>>>> = const { RefCell::new(None) };
    }

    fn with_game<R>(f: impl FnOnce(&mut BrowserGame) -> R) -> Option<R> {
        let game = GAME.with(|g| g.borrow().clone())?;
        let mut g = game.try_borrow_mut().ok()?;
        Some(f(&mut g))
    }

    fn window_viewport(window: &web_sys::Window) -> Viewport {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(basket_catch::consts::DEFAULT_VIEWPORT_WIDTH as f64);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(basket_catch::consts::DEFAULT_VIEWPORT_HEIGHT as f64);
        Viewport::new(width as f32, height as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger unavailable: {}", e).into());
        }

        log::info!("Basket Catch starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let mut settings = Settings::load();
        let seed = *settings.seed.get_or_insert(js_sys::Date::now() as u64);
        let viewport = window_viewport(&window);
        let presenter = DomPresenter::new(document.clone());

        let game = Rc::new_cyclic(|weak| {
            RefCell::new(GameLoop::new(
                settings,
                viewport,
                BrowserScheduler::new(weak.clone()),
                presenter,
            ))
        });
        log::info!(
            "Game initialized with seed {} ({}x{})",
            seed,
            viewport.width,
            viewport.height
        );

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&window, game.clone());
        setup_restart_button(&document);

        game.borrow_mut().start();
        GAME.with(|g| *g.borrow_mut() = Some(game));

        log::info!("Basket Catch running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<BrowserGame>>) {
        // Mouse move
        {
            let game = Rc::downgrade(&game);
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().on_pointer_move(event.client_x() as f32);
                }
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = Rc::downgrade(&game);
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0)
                    && let Some(game) = game.upgrade()
                {
                    game.borrow_mut().on_pointer_move(touch.client_x() as f32);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let game = Rc::downgrade(&game);
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let (Some(game), Some(window)) = (game.upgrade(), web_sys::window()) {
                    let viewport = window_viewport(&window);
                    game.borrow_mut().resize(viewport.width, viewport.height);
                }
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = Rc::downgrade(&game);
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let Some(game) = game.upgrade() else {
                    return;
                };
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "m" | "M" => {
                        let mode = match g.input_mode() {
                            InputMode::Pointer => InputMode::External,
                            InputMode::External => InputMode::Pointer,
                        };
                        g.set_input_mode(mode);
                    }
                    "Escape" => {
                        g.stop();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &web_sys::Document) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Start a fresh round
    #[wasm_bindgen]
    pub fn restart() {
        with_game(|g| {
            g.reset();
            g.start();
        });
    }

    /// Feed one tracked-joint sample (JSON with `depthX` and `cameraZ`)
    #[wasm_bindgen]
    pub fn push_joint_sample(json: &str) {
        match JointSample::from_json(json) {
            Ok(sample) => {
                with_game(|g| g.on_sensor_sample(&sample));
            }
            Err(e) => log::warn!("Ignoring joint sample: {}", e),
        }
    }

    /// `SessionConfig` message to send to the sensor server for the current
    /// subscriptions
    #[wasm_bindgen]
    pub fn sensor_session_config() -> Option<String> {
        let config = with_game(|g| g.sensor().session_config())?;
        match config.to_message() {
            Ok(message) => Some(message),
            Err(e) => {
                log::error!("Failed to encode session config: {}", e);
                None
            }
        }
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen]
    pub fn drain_events_json() -> String {
        let events = with_game(|g| g.drain_events()).unwrap_or_default();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main; this only satisfies the bin target
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use basket_catch::input::JointSample;
    use basket_catch::platform::ManualScheduler;
    use basket_catch::sim::InputMode;
    use basket_catch::view::RecordingPresenter;
    use basket_catch::{GameEvent, GameLoop, GameMode, Settings, Viewport};

    env_logger::init();
    log::info!("Basket Catch (native) starting...");
    log::info!("Native mode plays a headless round - run with `trunk serve` for the web version");

    let mut settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load_from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::from_mode(GameMode::Timed),
    };
    let seed = *settings.seed.get_or_insert_with(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    let round_ms = settings.round_duration().unwrap_or(30) as f64 * 1000.0 + 500.0;

    let viewport = Viewport::default();
    let mut game = GameLoop::new(
        settings,
        viewport,
        ManualScheduler::new(),
        RecordingPresenter::new(),
    );
    game.start();

    // Scripted player: chase the lowest ball at a human-ish speed
    const MAX_STEP: f32 = 12.0;
    let mut hand_x = viewport.width / 2.0;
    let frames = (round_ms / game.scheduler().frame_ms()).ceil() as u64;
    let (mut caught, mut missed) = (0u32, 0u32);

    for _ in 0..frames {
        let target = game
            .state()
            .live_balls()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|b| b.pos.x)
            .unwrap_or(hand_x);
        hand_x += (target - hand_x).clamp(-MAX_STEP, MAX_STEP);

        match game.input_mode() {
            InputMode::Pointer => game.on_pointer_move(hand_x),
            InputMode::External => {
                let calibration = game.sensor().calibration();
                let sample = JointSample {
                    depth_x: (hand_x / viewport.width + calibration.offset) / calibration.scale,
                    camera_z: 1.0,
                };
                game.on_sensor_sample(&sample);
            }
        }
        game.advance_frame();

        for event in game.drain_events() {
            match event {
                GameEvent::BallCaught { .. } => caught += 1,
                GameEvent::BallMissed { .. } => missed += 1,
                GameEvent::RoundOver { score } => log::info!("Round over, score {}", score),
                _ => {}
            }
        }
    }

    log::info!(
        "Seed {}: {} caught, {} missed, {} in flight, phase {:?}",
        seed,
        caught,
        missed,
        game.state().live_count(),
        game.phase()
    );
    println!("score: {}", game.score());
}
