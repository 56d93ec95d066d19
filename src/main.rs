//! Flak 404 entry point
//!
//! On the web this wires browser input to a `Session` and runs the frame loop,
//! handing each snapshot to the page's renderer. Natively it plays a headless
//! demo round with a simple automatic gunner.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, MouseEvent, PageTransitionEvent, TouchEvent};

    use flak_404::consts::SIM_DT;
    use flak_404::{LoopControl, LoopToken, Session, Tuning};

    // Drawing is owned by the page; it registers window.renderFlak404(snapshot)
    #[wasm_bindgen(inline_js = "
        export function render_snapshot(json) {
            if (typeof window.renderFlak404 === 'function') {
                window.renderFlak404(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn render_snapshot(json: &str);
    }

    /// Browser-side game wrapper
    struct Game {
        session: Session,
        last_time: f64,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64) -> Self {
            let session = match Session::with_tuning(tuning, seed) {
                Ok(session) => session,
                Err(e) => {
                    log::warn!("Falling back to default tuning: {}", e);
                    Session::new(seed)
                }
            };
            Self {
                session,
                last_time: 0.0,
            }
        }

        /// Hand the current snapshot to the page renderer
        fn publish(&self) {
            match serde_json::to_string(&self.session.snapshot()) {
                Ok(json) => render_snapshot(&json),
                Err(e) => log::warn!("Snapshot serialization failed: {}", e),
            }
        }
    }

    fn field_element() -> Option<Element> {
        web_sys::window()?.document()?.get_element_by_id("flak404-field")
    }

    fn sync_field_size(game: &Rc<RefCell<Game>>, field: &Element) {
        let w = field.client_width() as f32;
        let h = field.client_height() as f32;
        game.borrow_mut().session.resize(w, h);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Flak 404 starting...");

        let Some(field) = field_element() else {
            log::error!("No #flak404-field element, game not started");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(Tuning::load(), seed)));
        sync_field_size(&game, &field);

        setup_input_handlers(&field, game.clone());
        setup_reset_button(game.clone());
        setup_teardown(game.clone());

        let token = game.borrow_mut().session.start();
        request_animation_frame(game, token);

        log::info!("Flak 404 running (seed {})", seed);
    }

    /// Client coordinates to field coordinates
    fn field_point(field: &Element, client_x: i32, client_y: i32) -> (f32, f32) {
        let rect = field.get_bounding_client_rect();
        (
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    fn setup_input_handlers(field: &Element, game: Rc<RefCell<Game>>) {
        // Pointer move - position relative to the field, not the event target
        {
            let game = game.clone();
            let field_clone = field.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let (x, y) = field_point(&field_clone, event.client_x(), event.client_y());
                game.borrow_mut().session.pointer_moved(x, y);
            });
            let _ = field
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - fire
        {
            let game = game.clone();
            let field_clone = field.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let (x, y) = field_point(&field_clone, event.client_x(), event.client_y());
                let mut g = game.borrow_mut();
                g.session.pointer_moved(x, y);
                g.session.trigger_fire();
            });
            let _ = field
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch - aim and fire at the touch point
        {
            let game = game.clone();
            let field_clone = field.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let (x, y) = field_point(&field_clone, touch.client_x(), touch.client_y());
                    let mut g = game.borrow_mut();
                    g.session.pointer_moved(x, y);
                    g.session.trigger_fire();
                }
            });
            let _ = field
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard - space fires at the current aim
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.key() == " " {
                    game.borrow_mut().session.trigger_fire();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize - field boundaries follow the element
        if let Some(window) = web_sys::window() {
            let field_clone = field.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
                sync_field_size(&game, &field_clone);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, token: LoopToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, token, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, token: LoopToken, time: f64) {
        let control = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            // A superseded loop exits without drawing over the new one
            if !g.session.is_current(token) {
                return;
            }
            let control = g.session.run_frame(token, dt);
            g.publish();
            control
        };

        if control == LoopControl::Continue {
            request_animation_frame(game, token);
        }
    }

    fn setup_reset_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("flak404-reset") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let token = {
                    let mut g = game.borrow_mut();
                    g.last_time = 0.0;
                    g.session.reset(seed)
                };
                request_animation_frame(game.clone(), token);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the loop when the page navigates away from the 404 screen, and
    /// start a fresh round when it is restored from the back/forward cache
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.cancel();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            // A first load is already running; only restored pages need a new loop
            if !event.persisted() {
                return;
            }
            let seed = js_sys::Date::now() as u64;
            let token = {
                let mut g = game.borrow_mut();
                g.last_time = 0.0;
                g.session.reset(seed)
            };
            request_animation_frame(game.clone(), token);
            log::info!("Page restored, new round with seed: {}", seed);
        });
        let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flak 404 (native) starting headless demo...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| flak_404::Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => flak_404::Tuning::load(),
    };

    demo::run(tuning);
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use flak_404::consts::SIM_DT;
    use flak_404::sim::GameEvent;
    use flak_404::{Session, Tuning};

    /// Longest demo round (seconds)
    const MAX_DEMO_SECONDS: u32 = 180;
    /// Frames between gunner shots
    const FIRE_EVERY: u32 = 12;

    pub fn run(tuning: Tuning) {
        let mut session = match Session::with_tuning(tuning, 0x404) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid tuning: {}", e);
                return;
            }
        };
        session.start();

        let mut frame = 0u32;
        let mut fired = 0u32;
        while !session.state().is_game_over()
            && session.state().game.elapsed_seconds < MAX_DEMO_SECONDS
        {
            // Aim at the interceptor closest to the origin
            let origin = session.state().origin();
            let target = session
                .state()
                .interceptors
                .iter()
                .map(|i| i.pos)
                .min_by(|a, b| {
                    a.distance(origin)
                        .partial_cmp(&b.distance(origin))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            if let Some(target) = target {
                session.pointer_moved(target.x, target.y);
                if frame % FIRE_EVERY == 0 {
                    session.trigger_fire();
                    fired += 1;
                }
            }

            session.advance(SIM_DT);
            for event in session.events() {
                if let GameEvent::DifficultyRaised(change) = event {
                    log::debug!("{:?}", change);
                }
            }
            frame += 1;
        }

        let game = &session.state().game;
        log::info!(
            "Demo finished: score {}, missed {}, {}s survived, {} shots, tier {}",
            game.score,
            game.missed,
            game.elapsed_seconds,
            fired,
            game.difficulty_tier
        );
        println!(
            "score={} missed={} elapsed={}s shots={} game_over={}",
            game.score, game.missed, game.elapsed_seconds, fired, game.game_over
        );
    }
}
