//! Falling ball entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identifier of a spawned ball (allocated in spawn order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BallId(pub u32);

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    /// Position in viewport pixels (y grows downward)
    pub pos: Vec2,
    /// Vertical velocity (pixels/frame)
    pub velocity_y: f32,
    /// Added to velocity each frame; fixed for the ball's lifetime
    pub acceleration: f32,
    /// Velocity above which a non-negative acceleration is no longer applied
    pub max_velocity: f32,
    /// True from spawn until caught or missed
    pub alive: bool,
    /// Set when the ball was retired by a catch
    pub caught: bool,
}

impl Ball {
    pub fn new(id: BallId, pos: Vec2, acceleration: f32, max_velocity: f32) -> Self {
        Self {
            id,
            pos,
            velocity_y: 0.0,
            acceleration,
            max_velocity,
            alive: true,
            caught: false,
        }
    }

    /// Advance one frame: move by the current velocity, then accelerate.
    ///
    /// Position is integrated before velocity, so the y reported after a frame
    /// reflects the previous frame's velocity. The cap only stops positive
    /// acceleration; a negative acceleration always applies.
    pub fn update(&mut self) {
        self.pos.y += self.velocity_y;
        if self.velocity_y < self.max_velocity || self.acceleration < 0.0 {
            self.velocity_y += self.acceleration;
        }
    }
}
