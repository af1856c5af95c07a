//! Basket Catch - A falling-ball catch game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, catch/miss, round clock)
//! - `game`: Frame-driven orchestrator wiring the simulation to a scheduler and presenter
//! - `platform`: Frame/interval scheduling (browser and virtual time)
//! - `view`: Presentation interface (DOM on web, recording when headless)
//! - `input`: Body-tracking sensor feed
//! - `settings`: Data-driven game configuration

pub mod game;
pub mod input;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod view;

pub use game::{GameEvent, GameLoop};
pub use settings::{GameMode, Settings, SettingsError};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Velocity cap; balls with non-negative acceleration stop speeding up past this
    pub const MAX_VELOCITY: f32 = 10.0;
    /// Default per-frame acceleration of a spawned ball (pixels/frame²)
    pub const BALL_ACCELERATION: f32 = 0.8;
    /// Rendered ball size (CSS pixels)
    pub const BALL_SIZE: f32 = 100.0;

    /// Distance from the viewport bottom at which a ball reaches the basket
    pub const BASKET_HEIGHT: f32 = 40.0;
    /// Horizontal distance from basket center within which a ball is caught
    pub const CATCH_RADIUS: f32 = 80.0;

    /// Spawn cadence without a round clock
    pub const SPAWN_INTERVAL_MS: u32 = 2000;
    /// Spawn cadence for timed rounds
    pub const TIMED_SPAWN_INTERVAL_MS: u32 = 1500;
    /// Length of a timed round
    pub const ROUND_DURATION_SECS: u32 = 30;
    /// Round clock period
    pub const COUNTDOWN_PERIOD_MS: u32 = 1000;

    /// Display refresh period assumed by the virtual-time scheduler (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Sensor calibration: normalized depth-camera x is scaled then shifted
    pub const SENSOR_SCALE: f32 = 1.5;
    pub const SENSOR_OFFSET: f32 = 0.4;
    /// Samples from bodies farther than this (meters) are ignored
    pub const SENSOR_MAX_DEPTH: f32 = 2.0;

    /// Viewport used before the host reports a real one
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
}

/// Visible play area in CSS pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: consts::DEFAULT_VIEWPORT_WIDTH,
            height: consts::DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Y coordinate a ball must reach to be level with a basket of the given height
    #[inline]
    pub fn basket_line(&self, basket_height: f32) -> f32 {
        self.height - basket_height
    }
}
