//! Game state and core simulation types
//!
//! Everything one run needs lives in `GameState`; the step functions in
//! `collision` and `progression` take it by reference.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{BrickLayout, Tuning};

/// Overall run status. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Something that happened during the last tick (for sound/effects hooks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball reflected off the left, right or top wall
    WallBounce,
    PaddleHit,
    BrickBroken { row: u32, column: u32 },
    /// Ball fell past the floor
    LifeLost,
    /// New level started (carries the new level number)
    LevelUp { level: u32 },
    Won,
    Lost,
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick while a direction is held
    pub step: f32,
}

impl Paddle {
    /// Paddle centred horizontally at the tuned height
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.field_width / 2.0 - tuning.paddle_width / 2.0,
                tuning.paddle_y(),
            ),
            size: Vec2::new(tuning.paddle_width, tuning.paddle_height),
            step: tuning.paddle_step,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Centre
    pub pos: Vec2,
    /// Per-tick displacement (dx, dy)
    pub vel: Vec2,
    pub radius: f32,
    /// Speed used when a paddle hit re-derives the velocity; grows per level
    pub speed: f32,
}

/// A single brick. Size is shared across the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub alive: bool,
}

/// Row-major grid of bricks, rebuilt wholesale on every level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    pub rows: u32,
    pub columns: u32,
    /// Width/height of every brick
    pub brick_size: Vec2,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Build a fully alive grid of `rows` rows using `layout`
    pub fn new(rows: u32, layout: &BrickLayout) -> Self {
        let mut bricks = Vec::with_capacity((rows * layout.columns) as usize);
        for r in 0..rows {
            for c in 0..layout.columns {
                bricks.push(Brick {
                    pos: Vec2::new(
                        c as f32 * (layout.offset_left + layout.width) + layout.offset_left,
                        r as f32 * (layout.offset_top + layout.height)
                            + layout.offset_top
                            + layout.margin_top,
                    ),
                    alive: true,
                });
            }
        }
        Self {
            rows,
            columns: layout.columns,
            brick_size: Vec2::new(layout.width, layout.height),
            bricks,
        }
    }

    /// Brick at (row, column)
    pub fn get(&self, row: u32, column: u32) -> Option<&Brick> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.bricks.get((row * self.columns + column) as usize)
    }

    pub fn get_mut(&mut self, row: u32, column: u32) -> Option<&mut Brick> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.bricks.get_mut((row * self.columns + column) as usize)
    }

    /// All bricks in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// True once every brick is broken
    pub fn is_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.alive)
    }
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    pub score: u64,
    pub lives: u8,
    /// Current level, 1-based
    pub level: u32,
    pub status: GameStatus,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let paddle = Paddle::new(&tuning);
        let bricks = BrickGrid::new(tuning.bricks.rows, &tuning.bricks);
        let ball = Ball {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: tuning.ball_radius,
            speed: tuning.ball_start_speed,
        };

        let mut state = Self {
            seed,
            lives: tuning.start_lives,
            tuning,
            paddle,
            ball,
            bricks,
            score: 0,
            level: 1,
            status: GameStatus::Playing,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };

        state.reset_ball();
        state
    }

    /// Put the ball back in its spawn state.
    ///
    /// Velocity always comes from `ball_spawn_speed`, not from the current
    /// (level-scaled) `ball.speed`.
    pub fn reset_ball(&mut self) {
        let spawn = self.tuning.ball_spawn_speed;
        self.ball.pos = Vec2::new(
            self.tuning.field_width / 2.0,
            self.paddle.pos.y - self.ball.radius,
        );
        let dx = if spawn > 0.0 && spawn.is_finite() {
            self.rng.random_range(-spawn..spawn)
        } else {
            0.0
        };
        self.ball.vel = Vec2::new(dx, -spawn);
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
