//! Platform abstraction layer
//!
//! Handles browser/headless differences for:
//! - Display-refresh callbacks (one tick, then request the next)
//! - Fixed-interval timers (ball spawning, round countdown)
//!
//! Every request returns a handle so stopping the game is an explicit
//! cancellation rather than a flag the next callback has to check.

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod manual;

pub use manual::{ManualScheduler, Wakeup};

/// Handle to a pending display-refresh callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub i32);

/// Handle to a repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalId(pub i32);

/// Repeating timers the game loop uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Spawn a new ball
    Spawn,
    /// One second of the round clock
    Countdown,
}

/// Source of frame and timer callbacks.
///
/// Implementations deliver `GameLoop::on_frame` once per requested frame and
/// `GameLoop::on_timer` every period until cleared. `None` means the platform
/// refused the request.
pub trait Scheduler {
    fn request_frame(&mut self) -> Option<FrameRequest>;
    fn cancel_frame(&mut self, request: FrameRequest);
    fn set_interval(&mut self, timer: Timer, period_ms: u32) -> Option<IntervalId>;
    fn clear_interval(&mut self, id: IntervalId);
}
