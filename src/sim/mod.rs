//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No scheduling, rendering or platform dependencies

pub mod ball;
pub mod basket;
pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallId};
pub use basket::{BasketTracker, InputMode};
pub use clock::{ClockTick, RoundClock};
pub use collision::{CatchZone, is_missed};
pub use state::{GamePhase, GameState, Outcome, Retirement};
pub use tick::{TickInput, TickReport, tick};
