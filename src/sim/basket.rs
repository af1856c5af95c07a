//! Player basket position tracking

use serde::{Deserialize, Serialize};

/// Which input drives the basket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Mouse/touch pointer movement
    #[default]
    Pointer,
    /// Body-tracking sensor feed
    External,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Pointer => "pointer",
            InputMode::External => "external",
        }
    }
}

/// The player's basket, tracked by horizontal position only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasketTracker {
    /// Basket center in viewport pixels
    pub x: f32,
    pub input_mode: InputMode,
}

impl BasketTracker {
    pub fn new(input_mode: InputMode) -> Self {
        Self { x: 0.0, input_mode }
    }

    /// Overwrite the position unconditionally
    pub fn set_position(&mut self, x: f32) {
        self.x = x;
    }

    /// Apply a position reported by `source`. Ignored unless `source` is the
    /// active input mode; returns true if applied.
    pub fn apply(&mut self, source: InputMode, x: f32) -> bool {
        if source != self.input_mode {
            return false;
        }
        self.set_position(x);
        true
    }
}
