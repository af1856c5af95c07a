//! Game settings
//!
//! Read once at startup: from a JSON file natively, or from the JSON text of
//! the `#game-settings` element on the web page.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::SensorCalibration;
use crate::sim::InputMode;

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Balls fall until the page is closed
    #[default]
    Endless,
    /// Fixed-length round bounded by the round clock
    Timed,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Endless => "Endless",
            GameMode::Timed => "Timed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "endless" | "free" => Some(GameMode::Endless),
            "timed" | "round" => Some(GameMode::Timed),
            _ => None,
        }
    }

    /// Spawn cadence for this mode
    pub fn spawn_interval_ms(&self) -> u32 {
        match self {
            GameMode::Endless => SPAWN_INTERVAL_MS,
            GameMode::Timed => TIMED_SPAWN_INTERVAL_MS,
        }
    }
}

/// Errors from loading settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "malformed settings: {}", e),
            SettingsError::Invalid(reason) => write!(f, "invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,
    /// Round length for `GameMode::Timed`
    pub round_duration_secs: u32,
    /// Overrides the mode's spawn cadence
    pub spawn_interval_ms: Option<u32>,

    // === Ball physics ===
    pub ball_acceleration: f32,
    pub max_velocity: f32,

    // === Basket ===
    pub basket_height: f32,
    pub catch_radius: f32,
    pub input_mode: InputMode,
    pub sensor: SensorCalibration,

    /// RNG seed; the host picks one when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Endless,
            round_duration_secs: ROUND_DURATION_SECS,
            spawn_interval_ms: None,

            ball_acceleration: BALL_ACCELERATION,
            max_velocity: MAX_VELOCITY,

            basket_height: BASKET_HEIGHT,
            catch_radius: CATCH_RADIUS,
            input_mode: InputMode::Pointer,
            sensor: SensorCalibration::default(),

            seed: None,
        }
    }
}

impl Settings {
    /// Create settings for a mode with everything else at defaults
    pub fn from_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Effective spawn cadence
    pub fn spawn_interval_ms(&self) -> u32 {
        self.spawn_interval_ms
            .unwrap_or_else(|| self.mode.spawn_interval_ms())
    }

    /// Round length, if this mode has a round clock
    pub fn round_duration(&self) -> Option<u32> {
        match self.mode {
            GameMode::Timed => Some(self.round_duration_secs),
            GameMode::Endless => None,
        }
    }

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.spawn_interval_ms() == 0 {
            return Err(SettingsError::Invalid("spawn_interval_ms must be positive"));
        }
        if self.mode == GameMode::Timed && self.round_duration_secs == 0 {
            return Err(SettingsError::Invalid(
                "round_duration_secs must be positive in timed mode",
            ));
        }
        if !(self.catch_radius > 0.0) {
            return Err(SettingsError::Invalid("catch_radius must be positive"));
        }
        if !(self.basket_height >= 0.0) {
            return Err(SettingsError::Invalid("basket_height must not be negative"));
        }
        if !(self.max_velocity > 0.0) {
            return Err(SettingsError::Invalid("max_velocity must be positive"));
        }
        if !self.ball_acceleration.is_finite() {
            return Err(SettingsError::Invalid("ball_acceleration must be finite"));
        }
        if !(self.sensor.scale.is_finite() && self.sensor.offset.is_finite()) {
            return Err(SettingsError::Invalid("sensor calibration must be finite"));
        }
        Ok(())
    }

    /// Element whose text content holds the settings JSON
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "game-settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring #{}: {}", Self::ELEMENT_ID, e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
