//! Lives, levels and the win/lose rules

use super::state::{BrickGrid, GameEvent, GameState, GameStatus};

/// Lost once the lives run out
pub fn check_game_over(lives: u8) -> GameStatus {
    if lives == 0 {
        GameStatus::Lost
    } else {
        GameStatus::Playing
    }
}

/// Fresh grid for `level` (1-based): one more row than the level before
pub fn generate_bricks(state: &GameState, level: u32) -> BrickGrid {
    let layout = &state.tuning.bricks;
    let rows = layout.rows + level.saturating_sub(1);
    BrickGrid::new(rows, layout)
}

/// Advance to the next level, or win, once every brick is broken.
///
/// Returns true if the level was completed this call.
pub fn check_level_up(state: &mut GameState) -> bool {
    if !state.bricks.is_cleared() {
        return false;
    }

    if state.level >= state.tuning.max_level {
        state.status = GameStatus::Won;
        state.emit(GameEvent::Won);
        log::info!("Won on level {} with score {}", state.level, state.score);
        return true;
    }

    let next = state.level + 1;
    state.bricks = generate_bricks(state, next);
    state.ball.speed += state.tuning.ball_speed_increment;
    state.reset_ball();
    state.level = next;
    state.emit(GameEvent::LevelUp { level: next });
    log::info!(
        "Level {}: {} rows, ball speed {}",
        state.level,
        state.bricks.rows,
        state.ball.speed
    );
    true
}
