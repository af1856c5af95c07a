//! Per-frame simulation tick
//!
//! Core game loop step: advance every live ball, then retire the ones that
//! fell off-screen or landed in the basket. Balls retired in one tick stay in
//! the arena, flagged dead, until the start of the next.

use super::collision::{CatchZone, is_missed};
use super::state::{GamePhase, GameState, Outcome, Retirement};
use crate::Viewport;

/// Inputs sampled once per frame (the basket cannot move mid-tick)
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    pub basket_x: f32,
    pub viewport: Viewport,
    pub basket_height: f32,
    pub catch_radius: f32,
}

/// What happened during a tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// False when the tick was skipped because the game is not running
    pub ran: bool,
    /// Balls retired this tick, in spawn order
    pub retired: Vec<Retirement>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    if state.phase != GamePhase::Running {
        return TickReport::default();
    }
    state.compact();
    state.frames += 1;

    let zone = CatchZone::new(
        &input.viewport,
        input.basket_x,
        input.basket_height,
        input.catch_radius,
    );
    let mut retired = Vec::new();

    for index in 0..state.balls.len() {
        let ball = &mut state.balls[index];
        if !ball.alive {
            continue;
        }
        ball.update();

        let (x, y) = (ball.pos.x, ball.pos.y);
        // Miss is checked first; a missed ball is never also caught
        let outcome = if is_missed(y, &input.viewport) {
            Some(Outcome::Missed)
        } else if zone.contains(x, y) {
            Some(Outcome::Caught)
        } else {
            None
        };

        if let Some(outcome) = outcome {
            let id = ball.id;
            if state.retire_at(index, outcome) {
                retired.push(Retirement { id, outcome });
            }
        }
    }

    TickReport { ran: true, retired }
}
