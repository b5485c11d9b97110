//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (bricks are scanned row-major)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod progression;
pub mod state;
pub mod tick;

pub use collision::{
    move_ball, move_paddle, resolve_brick_collision, resolve_paddle_collision,
    resolve_wall_collision,
};
pub use input::{Direction, InputState, SharedInput, autopilot};
pub use progression::{check_game_over, check_level_up, generate_bricks};
pub use state::{Ball, Brick, BrickGrid, GameEvent, GameState, GameStatus, Paddle};
pub use tick::{BrickCell, Circle, Game, Rect, Snapshot, tick};
