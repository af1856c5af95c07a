//! Browser scheduler: `requestAnimationFrame` and `setInterval`
//!
//! Callbacks hold a weak reference to the game so a dropped game simply stops
//! receiving them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameRequest, IntervalId, Scheduler, Timer};
use crate::game::GameLoop;
use crate::view::dom::DomPresenter;

pub type BrowserGame = GameLoop<BrowserScheduler, DomPresenter>;

pub struct BrowserScheduler {
    game: Weak<RefCell<BrowserGame>>,
    /// Closure of the outstanding animation frame
    frame: Option<(i32, Closure<dyn FnMut(f64)>)>,
    intervals: HashMap<i32, Closure<dyn FnMut()>>,
    /// Closures that may still be on the stack (a frame requesting the next
    /// one, an interval clearing itself); dropped on the following request
    retired_frame: Option<Closure<dyn FnMut(f64)>>,
    retired_intervals: Vec<Closure<dyn FnMut()>>,
}

impl BrowserScheduler {
    pub fn new(game: Weak<RefCell<BrowserGame>>) -> Self {
        Self {
            game,
            frame: None,
            intervals: HashMap::new(),
            retired_frame: None,
            retired_intervals: Vec::new(),
        }
    }
}

/// Run `f` against the game if it is still alive and not already borrowed
fn with_game(game: &Weak<RefCell<BrowserGame>>, f: impl FnOnce(&mut BrowserGame)) {
    let Some(game) = game.upgrade() else {
        return;
    };
    match game.try_borrow_mut() {
        Ok(mut g) => f(&mut g),
        Err(_) => log::warn!("Game busy; callback dropped"),
    };
}

impl Scheduler for BrowserScheduler {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        self.retired_intervals.clear();
        self.retired_frame = self.frame.take().map(|(_, callback)| callback);

        let window = web_sys::window()?;
        let game = self.game.clone();
        let callback = Closure::once(move |_time: f64| {
            with_game(&game, |g| g.on_frame());
        });
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => {
                self.frame = Some((id, callback));
                Some(FrameRequest(id))
            }
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if let Some(window) = web_sys::window()
            && let Err(e) = window.cancel_animation_frame(request.0)
        {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
        // Never runs now, so its closure can go
        if self.frame.as_ref().is_some_and(|(id, _)| *id == request.0) {
            self.frame = None;
        }
    }

    fn set_interval(&mut self, timer: Timer, period_ms: u32) -> Option<IntervalId> {
        let window = web_sys::window()?;
        let game = self.game.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            with_game(&game, |g| g.on_timer(timer));
        });
        let result = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms.min(i32::MAX as u32) as i32,
        );
        match result {
            Ok(id) => {
                self.intervals.insert(id, callback);
                log::trace!("{:?} interval {} every {}ms", timer, id, period_ms);
                Some(IntervalId(id))
            }
            Err(e) => {
                log::warn!("setInterval failed for {:?}: {:?}", timer, e);
                None
            }
        }
    }

    fn clear_interval(&mut self, id: IntervalId) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(id.0);
        }
        if let Some(callback) = self.intervals.remove(&id.0) {
            self.retired_intervals.push(callback);
        }
    }
}
