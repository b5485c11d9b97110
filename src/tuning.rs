//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host can load a JSON file instead
//! of recompiling. Missing fields fall back to the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Brick grid geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    /// Rows on level 1 (one more per level-up)
    pub rows: u32,
    pub columns: u32,
    pub width: f32,
    pub height: f32,
    /// Horizontal gap between cells, also the left inset
    pub offset_left: f32,
    /// Vertical gap between cells, also the top inset
    pub offset_top: f32,
    /// Extra space above the first row (HUD strip)
    pub margin_top: f32,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            columns: BRICK_COLUMNS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            offset_left: BRICK_OFFSET_LEFT,
            offset_top: BRICK_OFFSET_TOP,
            margin_top: BRICK_MARGIN_TOP,
        }
    }
}

impl BrickLayout {
    /// Right edge of the last column
    pub fn right_edge(&self) -> f32 {
        self.columns as f32 * (self.offset_left + self.width)
    }

    /// Bottom edge of the last row for a grid with `rows` rows
    pub fn bottom_edge(&self, rows: u32) -> f32 {
        rows as f32 * (self.offset_top + self.height) + self.margin_top
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle's bottom edge and the floor
    pub paddle_margin_bottom: f32,
    pub paddle_step: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start_speed: f32,
    pub ball_speed_increment: f32,
    /// Spawn velocity magnitude; independent of the level's ball speed
    pub ball_spawn_speed: f32,

    // === Bricks ===
    pub bricks: BrickLayout,

    // === Rules ===
    pub score_unit: u64,
    pub start_lives: u8,
    pub max_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin_bottom: PADDLE_MARGIN_BOTTOM,
            paddle_step: PADDLE_STEP,

            ball_radius: BALL_RADIUS,
            ball_start_speed: BALL_START_SPEED,
            ball_speed_increment: BALL_SPEED_INCREMENT,
            ball_spawn_speed: BALL_SPAWN_SPEED,

            bricks: BrickLayout::default(),

            score_unit: SCORE_UNIT,
            start_lives: START_LIVES,
            max_level: MAX_LEVEL,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Paddle top edge (the paddle never moves vertically)
    pub fn paddle_y(&self) -> f32 {
        self.field_height - self.paddle_margin_bottom - self.paddle_height
    }

    /// Reject geometry the simulation cannot play
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_margin_bottom", self.paddle_margin_bottom),
            ("paddle_step", self.paddle_step),
            ("ball_radius", self.ball_radius),
            ("ball_start_speed", self.ball_start_speed),
            ("ball_speed_increment", self.ball_speed_increment),
            ("ball_spawn_speed", self.ball_spawn_speed),
            ("bricks.width", self.bricks.width),
            ("bricks.height", self.bricks.height),
            ("bricks.offset_left", self.bricks.offset_left),
            ("bricks.offset_top", self.bricks.offset_top),
            ("bricks.margin_top", self.bricks.margin_top),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::Invalid(format!(
                "{name} must be finite, got {value}"
            )));
        }

        let non_negative = [
            ("paddle_margin_bottom", self.paddle_margin_bottom),
            ("ball_speed_increment", self.ball_speed_increment),
            ("ball_spawn_speed", self.ball_spawn_speed),
            ("bricks.offset_left", self.bricks.offset_left),
            ("bricks.offset_top", self.bricks.offset_top),
            ("bricks.margin_top", self.bricks.margin_top),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(TuningError::Invalid(format!(
                "{name} must not be negative, got {value}"
            )));
        }

        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("ball_radius", self.ball_radius),
            ("ball_start_speed", self.ball_start_speed),
            ("bricks.width", self.bricks.width),
            ("bricks.height", self.bricks.height),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(TuningError::Invalid(format!(
                "{name} must be positive, got {value}"
            )));
        }

        if self.paddle_width > self.field_width {
            return Err(TuningError::Invalid(format!(
                "paddle_width {} exceeds field_width {}",
                self.paddle_width, self.field_width
            )));
        }
        if self.paddle_y() < 0.0 {
            return Err(TuningError::Invalid(
                "paddle does not fit inside the field".to_string(),
            ));
        }
        if self.bricks.rows == 0 || self.bricks.columns == 0 {
            return Err(TuningError::Invalid(
                "brick grid needs at least one row and one column".to_string(),
            ));
        }
        if self.bricks.right_edge() > self.field_width {
            return Err(TuningError::Invalid(format!(
                "brick columns span {} but field is {} wide",
                self.bricks.right_edge(),
                self.field_width
            )));
        }
        // Deepest grid is on the final level; it must stay above the paddle
        let final_rows = self.bricks.rows.saturating_add(self.max_level.saturating_sub(1));
        if self.bricks.bottom_edge(final_rows) > self.paddle_y() {
            return Err(TuningError::Invalid(format!(
                "{final_rows} brick rows reach below the paddle"
            )));
        }
        if self.start_lives == 0 {
            return Err(TuningError::Invalid("start_lives must be at least 1".to_string()));
        }
        if self.max_level == 0 {
            return Err(TuningError::Invalid("max_level must be at least 1".to_string()));
        }
        if self.score_unit > MAX_SCORE_UNIT {
            return Err(TuningError::Invalid(format!(
                "score_unit {} exceeds {MAX_SCORE_UNIT}",
                self.score_unit
            )));
        }
        Ok(())
    }
}
