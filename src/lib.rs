//! Brickbreak - A single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, progression)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use sim::{Direction, Game, GameStatus, InputState, Snapshot};
pub use tuning::{BrickLayout, Tuning, TuningError};

/// Default gameplay constants (overridable through `Tuning`)
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_MARGIN_BOTTOM: f32 = 50.0;
    /// Pixels moved per tick while a direction is held
    pub const PADDLE_STEP: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Speed used to re-derive velocity on paddle hits
    pub const BALL_START_SPEED: f32 = 5.0;
    /// Added to ball speed on every level-up
    pub const BALL_SPEED_INCREMENT: f32 = 0.5;
    /// Spawn velocity: dx in [-SPAWN_SPEED, SPAWN_SPEED), dy = -SPAWN_SPEED
    pub const BALL_SPAWN_SPEED: f32 = 3.0;

    /// Bricks
    pub const BRICK_ROWS: u32 = 1;
    pub const BRICK_COLUMNS: u32 = 5;
    pub const BRICK_WIDTH: f32 = 55.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_OFFSET_LEFT: f32 = 20.0;
    pub const BRICK_OFFSET_TOP: f32 = 20.0;
    pub const BRICK_MARGIN_TOP: f32 = 40.0;

    /// Scoring and progression
    pub const SCORE_UNIT: u64 = 10;
    pub const START_LIVES: u8 = 3;
    pub const MAX_LEVEL: u32 = 3;
    /// Largest score_unit a tuning file may set
    pub const MAX_SCORE_UNIT: u64 = 1_000_000;

    /// Maximum bounce angle off the paddle (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
}
