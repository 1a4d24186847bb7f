//! Browser bindings
//!
//! The page owns rendering and the animation-frame loop; it forwards taps and
//! button presses here and reads back JSON snapshots and events.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::sim::{Session, TapOutcome};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already set: {e}").into());
    }
    log::info!("Drop Catch loaded");
}

/// A game session driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Rc<RefCell<Session>>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let session = Rc::new(RefCell::new(Session::new(Tuning::load(), seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_auto_pause(session.clone());
        WebGame { session }
    }

    pub fn start(&self) -> bool {
        self.session.borrow_mut().start()
    }

    /// Pause/Resume button
    pub fn toggle_pause(&self) -> bool {
        self.session.borrow_mut().toggle_pause()
    }

    pub fn restart(&self) {
        self.session.borrow_mut().restart();
    }

    /// Play Again on the results screen
    pub fn play_again(&self) {
        self.session.borrow_mut().restart();
    }

    pub fn exit_to_menu(&self) {
        self.session.borrow_mut().exit_to_menu();
    }

    /// Tap on object `id`; false if the tap was ignored
    pub fn tap(&self, id: u32) -> bool {
        !matches!(self.session.borrow_mut().on_tap(id), TapOutcome::Ignored)
    }

    /// Advance by a requestAnimationFrame delta in milliseconds
    pub fn advance(&self, dt_ms: f64) -> u32 {
        self.session.borrow_mut().advance((dt_ms / 1000.0) as f32)
    }

    /// Current state as JSON
    pub fn snapshot(&self) -> String {
        to_json(&self.session.borrow().snapshot())
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events(&self) -> String {
        to_json(&self.session.borrow_mut().drain_events())
    }

    pub fn help_text(&self) -> String {
        crate::help_text(self.session.borrow().tuning())
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize: {}", e);
        "null".to_string()
    })
}

/// Pause when the tab is hidden
fn setup_auto_pause(session: Rc<RefCell<Session>>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document; auto-pause disabled");
        return;
    };

    let document_clone = document.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
            && session.borrow_mut().pause()
        {
            log::info!("Auto-paused (tab hidden)");
        }
    });
    let _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}
