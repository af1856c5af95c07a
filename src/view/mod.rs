//! Presentation interface
//!
//! The game loop only writes to views; it never reads rendered geometry back.
//! On the web, balls and the basket are DOM elements positioned through CSS
//! custom properties (`dom`). Headless runs use `RecordingPresenter`.

#[cfg(target_arch = "wasm32")]
pub mod dom;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::sim::{Ball, BallId, GamePhase};

/// Handle to a ball view created by a presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewHandle(pub u32);

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Hud {
    pub score: u64,
    /// Seconds left in a timed round
    pub time_left_secs: Option<u32>,
    pub phase: GamePhase,
}

/// Renders game state. Called directly by the game loop.
pub trait Presenter {
    fn create_ball_view(&mut self, id: BallId) -> ViewHandle;
    /// Write position, acceleration and caught flag
    fn update_ball_view(&mut self, view: ViewHandle, ball: &Ball);
    fn destroy_ball_view(&mut self, view: ViewHandle);
    fn update_basket(&mut self, x: f32);
    fn update_hud(&mut self, hud: &Hud);
}

/// Last values written to a ball view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub id: BallId,
    pub x: f32,
    pub y: f32,
    pub acceleration: f32,
    pub caught: bool,
}

/// Presenter that keeps what a renderer would show
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub views: BTreeMap<ViewHandle, BallView>,
    pub basket_x: f32,
    pub hud: Hud,
    pub created: u32,
    pub destroyed: u32,
    /// Destroy calls for handles that were not live
    pub stale_destroys: u32,
    next_handle: u32,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_views(&self) -> usize {
        self.views.len()
    }

    pub fn view_of(&self, id: BallId) -> Option<&BallView> {
        self.views.values().find(|v| v.id == id)
    }
}

impl Presenter for RecordingPresenter {
    fn create_ball_view(&mut self, id: BallId) -> ViewHandle {
        let handle = ViewHandle(self.next_handle);
        self.next_handle += 1;
        self.created += 1;
        self.views.insert(
            handle,
            BallView {
                id,
                x: 0.0,
                y: 0.0,
                acceleration: 0.0,
                caught: false,
            },
        );
        handle
    }

    fn update_ball_view(&mut self, view: ViewHandle, ball: &Ball) {
        if let Some(v) = self.views.get_mut(&view) {
            v.x = ball.pos.x;
            v.y = ball.pos.y;
            v.acceleration = ball.acceleration;
            v.caught = ball.caught;
        }
    }

    fn destroy_ball_view(&mut self, view: ViewHandle) {
        if self.views.remove(&view).is_some() {
            self.destroyed += 1;
        } else {
            self.stale_destroys += 1;
        }
    }

    fn update_basket(&mut self, x: f32) {
        self.basket_x = x;
    }

    fn update_hud(&mut self, hud: &Hud) {
        self.hud = *hud;
    }
}
