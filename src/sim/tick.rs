//! Frame loop
//!
//! One call to `tick` advances the simulation by exactly one rendered frame.
//! The host owns the clock and keeps calling while `Game::tick` returns true.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    move_ball, move_paddle, resolve_brick_collision, resolve_paddle_collision,
    resolve_wall_collision,
};
use super::input::{Direction, InputState};
use super::progression::{check_game_over, check_level_up};
use super::state::{GameEvent, GameState, GameStatus};
use crate::tuning::Tuning;

/// Advance the game state by one tick. No-op once the run has ended.
///
/// Step order is fixed: paddle, ball, walls, paddle bounce, bricks, then
/// the game-over and level-up rules.
pub fn tick(state: &mut GameState, input: &InputState) {
    if state.status.is_terminal() {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    move_paddle(&mut state.paddle, input, state.tuning.field_width);
    move_ball(&mut state.ball);

    resolve_wall_collision(state);
    if resolve_paddle_collision(&mut state.ball, &state.paddle) {
        state.emit(GameEvent::PaddleHit);
    }
    resolve_brick_collision(state);

    state.status = check_game_over(state.lives);
    if state.status == GameStatus::Lost {
        state.emit(GameEvent::Lost);
        log::info!("Game over on level {} with score {}", state.level, state.score);
        return;
    }

    check_level_up(state);
}

/// Axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickCell {
    pub rect: Rect,
    pub alive: bool,
}

/// Read-only view of one frame for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field: Vec2,
    pub paddle: Rect,
    pub ball: Circle,
    /// Row-major
    pub bricks: Vec<BrickCell>,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub status: GameStatus,
    /// Events raised by the tick that produced this frame
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let brick_size = state.bricks.brick_size;
        Self {
            field: Vec2::new(state.tuning.field_width, state.tuning.field_height),
            paddle: Rect {
                pos: state.paddle.pos,
                size: state.paddle.size,
            },
            ball: Circle {
                center: state.ball.pos,
                radius: state.ball.radius,
            },
            bricks: state
                .bricks
                .iter()
                .map(|b| BrickCell {
                    rect: Rect {
                        pos: b.pos,
                        size: brick_size,
                    },
                    alive: b.alive,
                })
                .collect(),
            score: state.score,
            lives: state.lives,
            level: state.level,
            status: state.status,
            events: state.events.clone(),
        }
    }
}

/// Host-facing driver: owns the state and the held input flags
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    input: InputState,
}

impl Game {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        log::info!("New game with seed {}", seed);
        Self {
            state: GameState::new(tuning, seed),
            input: InputState::default(),
        }
    }

    /// Key press/release from the host
    pub fn set_input(&mut self, direction: Direction, pressed: bool) {
        self.input.set(direction, pressed);
    }

    /// Replace both flags at once (e.g. from `SharedInput::sample`)
    pub fn set_input_state(&mut self, input: InputState) {
        self.input = input;
    }

    /// Run one frame. Returns whether the host should schedule another.
    pub fn tick(&mut self) -> bool {
        tick(&mut self.state, &self.input);
        !self.state.status.is_terminal()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Throw the run away and start over with the same tuning
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting with seed {}", seed);
        self.state = GameState::new(self.state.tuning.clone(), seed);
        self.input = InputState::default();
    }
}
