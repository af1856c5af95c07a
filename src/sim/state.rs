//! Game state and core simulation types
//!
//! The live-ball arena and score are owned here and only mutated through
//! `GameState` methods, so retirement bookkeeping stays in one place.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallId};

/// Lifecycle of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, not yet started
    #[default]
    Idle,
    /// Frames and spawns are being processed
    Running,
    /// Round over; balls in flight are frozen
    Stopped,
}

/// Why a ball left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Caught,
    Missed,
}

/// A ball retired during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retirement {
    pub id: BallId,
    pub outcome: Outcome,
}

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Successful catches; never decremented
    pub score: u64,
    /// Balls in spawn order. Retired balls stay flagged dead until the next
    /// `compact`.
    pub balls: Vec<Ball>,
    /// Frames processed while running
    pub frames: u64,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            balls: Vec::new(),
            frames: 0,
            next_id: 1,
        }
    }

    /// Allocate a new ball ID
    pub fn next_ball_id(&mut self) -> BallId {
        let id = BallId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Uniform sample in [0, 1) from the run RNG
    pub fn random_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Add a ball to the arena and return its ID
    pub fn spawn_ball(&mut self, pos: Vec2, acceleration: f32, max_velocity: f32) -> BallId {
        let id = self.next_ball_id();
        self.balls.push(Ball::new(id, pos, acceleration, max_velocity));
        id
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Balls still in play, in spawn order
    pub fn live_balls(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| b.alive)
    }

    pub fn live_count(&self) -> usize {
        self.live_balls().count()
    }

    /// Retire a ball by ID. Retiring a ball that is already dead (or gone) is
    /// a no-op and returns false.
    pub fn retire(&mut self, id: BallId, outcome: Outcome) -> bool {
        match self.balls.iter().position(|b| b.id == id) {
            Some(index) => self.retire_at(index, outcome),
            None => false,
        }
    }

    pub(super) fn retire_at(&mut self, index: usize, outcome: Outcome) -> bool {
        let ball = &mut self.balls[index];
        if !ball.alive {
            return false;
        }
        ball.alive = false;
        if outcome == Outcome::Caught {
            ball.caught = true;
            self.score += 1;
        }
        true
    }

    /// Drop retired balls, keeping spawn order
    pub fn compact(&mut self) {
        self.balls.retain(|b| b.alive);
    }

    /// Clear balls and score and return to `Idle`. The RNG keeps its stream so
    /// consecutive rounds get different spawn positions.
    pub fn reset(&mut self) {
        self.balls.clear();
        self.score = 0;
        self.frames = 0;
        self.phase = GamePhase::Idle;
    }
}
