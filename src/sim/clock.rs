//! Timed-round countdown

use serde::{Deserialize, Serialize};

/// Result of advancing the clock by one second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Clock was not running; nothing changed
    Idle,
    /// Seconds left after this tick (always > 0)
    Remaining(u32),
    /// The round just ran out. Returned exactly once per `start`.
    Expired,
}

/// One-second countdown gating spawns in timed rounds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundClock {
    time_left_secs: u32,
    running: bool,
}

impl RoundClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a countdown from `duration_secs`. A zero duration never runs.
    pub fn start(&mut self, duration_secs: u32) {
        self.time_left_secs = duration_secs;
        self.running = duration_secs > 0;
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    /// True only while time remains
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by one second.
    ///
    /// Extra ticks after expiry (e.g. a second countdown listener firing in the
    /// same second) are `Idle`, so `Expired` is observed once.
    pub fn tick(&mut self) -> ClockTick {
        if !self.running {
            return ClockTick::Idle;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs == 0 {
            self.running = false;
            ClockTick::Expired
        } else {
            ClockTick::Remaining(self.time_left_secs)
        }
    }

    /// Halt without expiring (used when the loop is stopped from outside)
    pub fn halt(&mut self) {
        self.running = false;
    }
}
