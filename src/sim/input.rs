//! Paddle input
//!
//! The core only sees two held/released flags. Key mapping belongs to the host.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Horizontal paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Held flags for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Record a press or release
    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Input flags shared with an event thread.
///
/// Clones share the same flags. The tick reads them once through `sample`.
#[derive(Debug, Clone, Default)]
pub struct SharedInput {
    flags: Arc<[AtomicBool; 2]>,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, direction: Direction, pressed: bool) {
        self.flag(direction).store(pressed, Ordering::Release);
    }

    /// Copy of the current flags
    pub fn sample(&self) -> InputState {
        InputState {
            left: self.flag(Direction::Left).load(Ordering::Acquire),
            right: self.flag(Direction::Right).load(Ordering::Acquire),
        }
    }

    fn flag(&self, direction: Direction) -> &AtomicBool {
        match direction {
            Direction::Left => &self.flags[0],
            Direction::Right => &self.flags[1],
        }
    }
}

/// Demo AI: chase the ball's x with the paddle centre
pub fn autopilot(state: &GameState) -> InputState {
    // Dead zone of one step avoids jittering around the target
    let delta = state.ball.pos.x - state.paddle.center_x();
    InputState {
        left: delta < -state.paddle.step,
        right: delta > state.paddle.step,
    }
}
