//! Per-tick physics: movement and collision response
//!
//! Collisions are discrete. The ball moves its full velocity each tick and is
//! tested where it lands, so very fast balls can tunnel through thin bricks.

use glam::Vec2;

use super::input::InputState;
use super::state::{Ball, GameEvent, GameState, Paddle};
use crate::consts::MAX_BOUNCE_ANGLE;

/// Step the paddle one tick. Right wins when both directions are held.
///
/// A move only happens if the paddle is not already touching the wall it is
/// heading for, and never carries it past that wall.
pub fn move_paddle(paddle: &mut Paddle, input: &InputState, field_width: f32) {
    let max_x = field_width - paddle.width();
    if input.right && paddle.pos.x + paddle.width() < field_width {
        paddle.pos.x = (paddle.pos.x + paddle.step).min(max_x);
    } else if input.left && paddle.pos.x > 0.0 {
        paddle.pos.x = (paddle.pos.x - paddle.step).max(0.0);
    }
}

/// Free flight
#[inline]
pub fn move_ball(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Bounce off the side and top walls; lose a life through the floor.
///
/// Each check is independent, so a corner hit flips both axes.
/// Returns true if a life was lost.
pub fn resolve_wall_collision(state: &mut GameState) -> bool {
    let width = state.tuning.field_width;
    let height = state.tuning.field_height;
    let ball = &mut state.ball;
    let mut bounced = false;

    if ball.pos.x + ball.radius > width || ball.pos.x - ball.radius < 0.0 {
        ball.vel.x = -ball.vel.x;
        bounced = true;
    }

    if ball.pos.y - ball.radius < 0.0 {
        ball.vel.y = -ball.vel.y;
        bounced = true;
    }

    let fell = ball.pos.y + ball.radius > height;

    if bounced {
        state.emit(GameEvent::WallBounce);
    }

    if fell {
        state.lives = state.lives.saturating_sub(1);
        state.reset_ball();
        state.emit(GameEvent::LifeLost);
        log::debug!("Ball lost, {} lives left", state.lives);
    }

    fell
}

/// Bounce off the paddle with an angle set by where the ball landed.
///
/// Only the ball's centre is tested against the paddle rectangle. The new
/// velocity has magnitude `ball.speed`, up to 60 degrees off vertical.
pub fn resolve_paddle_collision(ball: &mut Ball, paddle: &Paddle) -> bool {
    let inside = ball.pos.y > paddle.pos.y
        && ball.pos.y < paddle.pos.y + paddle.size.y
        && ball.pos.x > paddle.pos.x
        && ball.pos.x < paddle.pos.x + paddle.size.x;
    if !inside {
        return false;
    }

    let offset = ball.pos.x - paddle.center_x();
    let normalized = offset / (paddle.width() / 2.0);
    ball.vel = bounce_velocity(normalized * MAX_BOUNCE_ANGLE, ball.speed);
    true
}

/// Velocity leaving the paddle at `angle` from straight up
#[inline]
pub fn bounce_velocity(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}

/// Break every alive brick the ball's bounding square overlaps.
///
/// Scans row-major without stopping at the first hit; every hit flips dy
/// and scores. Returns the number of bricks broken.
pub fn resolve_brick_collision(state: &mut GameState) -> u32 {
    let unit = state.tuning.score_unit;
    let size = state.bricks.brick_size;
    let columns = state.bricks.columns;
    let pos = state.ball.pos;
    let r = state.ball.radius;
    let mut broken = 0;

    for (i, brick) in state.bricks.iter_mut().enumerate() {
        if !brick.alive {
            continue;
        }
        let overlaps = pos.x + r > brick.pos.x
            && pos.x - r < brick.pos.x + size.x
            && pos.y + r > brick.pos.y
            && pos.y - r < brick.pos.y + size.y;
        if overlaps {
            brick.alive = false;
            state.ball.vel.y = -state.ball.vel.y;
            state.score = state.score.saturating_add(unit);
            broken += 1;

            let (row, column) = (i as u32 / columns, i as u32 % columns);
            state.events.push(GameEvent::BrickBroken { row, column });
            log::trace!("Brick ({row}, {column}) broken, score {}", state.score);
        }
    }

    broken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn paddle_at(x: f32) -> Paddle {
        Paddle {
            pos: Vec2::new(x, 430.0),
            size: Vec2::new(100.0, 20.0),
            step: 5.0,
        }
    }

    fn ball_at(x: f32, y: f32, vel: Vec2) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel,
            radius: 8.0,
            speed: 5.0,
        }
    }

    #[test]
    fn test_paddle_blocked_at_right_wall() {
        // Already past the 300 limit: the gate refuses the move
        let mut paddle = paddle_at(310.0);
        let input = InputState { left: false, right: true };
        move_paddle(&mut paddle, &input, 400.0);
        assert_eq!(paddle.pos.x, 310.0);

        let mut paddle = paddle_at(300.0);
        move_paddle(&mut paddle, &input, 400.0);
        assert_eq!(paddle.pos.x, 300.0);
    }

    #[test]
    fn test_paddle_right_priority() {
        let mut paddle = paddle_at(150.0);
        let input = InputState { left: true, right: true };
        move_paddle(&mut paddle, &input, 400.0);
        assert_eq!(paddle.pos.x, 155.0);

        // Right is blocked at the wall, so left gets the tick
        let mut paddle = paddle_at(300.0);
        move_paddle(&mut paddle, &input, 400.0);
        assert_eq!(paddle.pos.x, 295.0);
    }

    #[test]
    fn test_paddle_stops_at_left_wall() {
        let mut paddle = paddle_at(3.0);
        let input = InputState { left: true, right: false };
        move_paddle(&mut paddle, &input, 400.0);
        assert_eq!(paddle.pos.x, 0.0);
        move_paddle(&mut paddle, &input, 400.0);
        assert_eq!(paddle.pos.x, 0.0);
    }

    #[test]
    fn test_move_ball() {
        let mut ball = ball_at(100.0, 100.0, Vec2::new(2.0, -3.0));
        move_ball(&mut ball);
        assert_eq!(ball.pos, Vec2::new(102.0, 97.0));
        assert_eq!(ball.vel, Vec2::new(2.0, -3.0));
    }

    #[test]
    fn test_top_wall_reflection() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.ball.pos = Vec2::new(200.0, 5.0);
        state.ball.vel = Vec2::new(1.0, -3.0);
        assert!(!resolve_wall_collision(&mut state));
        assert_eq!(state.ball.vel, Vec2::new(1.0, 3.0));
        assert_eq!(state.lives, 3);
        assert_eq!(state.events, vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_corner_flips_both_axes() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.ball.pos = Vec2::new(395.0, 4.0);
        state.ball.vel = Vec2::new(3.0, -3.0);
        resolve_wall_collision(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(-3.0, 3.0));
    }

    #[test]
    fn test_floor_costs_a_life() {
        for x in [10.0, 200.0, 390.0] {
            let mut state = GameState::new(Tuning::default(), 5);
            state.ball.pos = Vec2::new(x, 495.0);
            state.ball.vel = Vec2::new(0.0, 3.0);
            assert!(resolve_wall_collision(&mut state));
            assert_eq!(state.lives, 2);
            assert_eq!(state.ball.pos, Vec2::new(200.0, 422.0));
            assert_eq!(state.ball.vel.y, -3.0);
            assert!(state.events.contains(&GameEvent::LifeLost));
        }
    }

    #[test]
    fn test_lives_saturate() {
        let mut state = GameState::new(Tuning::default(), 5);
        state.lives = 0;
        state.ball.pos = Vec2::new(200.0, 495.0);
        resolve_wall_collision(&mut state);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_paddle_center_hit_goes_straight_up() {
        let paddle = paddle_at(150.0);
        let mut ball = ball_at(200.0, 440.0, Vec2::new(1.0, 3.0));
        assert!(resolve_paddle_collision(&mut ball, &paddle));
        assert!(ball.vel.x.abs() < 1e-6);
        assert!((ball.vel.y + 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_paddle_edge_hit_angles_out() {
        let paddle = paddle_at(150.0);
        // Three quarters of the way to the right edge: 45 degrees
        let mut ball = ball_at(237.5, 440.0, Vec2::new(0.0, 3.0));
        assert!(resolve_paddle_collision(&mut ball, &paddle));
        let angle = 0.75 * MAX_BOUNCE_ANGLE;
        assert!((ball.vel.x - 5.0 * angle.sin()).abs() < 1e-5);
        assert!((ball.vel.y + 5.0 * angle.cos()).abs() < 1e-5);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_paddle_uses_center_point_only() {
        let paddle = paddle_at(150.0);
        // Circle overlaps the paddle top but the centre is above it
        let mut ball = ball_at(200.0, 425.0, Vec2::new(0.0, 3.0));
        assert!(!resolve_paddle_collision(&mut ball, &paddle));
        assert_eq!(ball.vel, Vec2::new(0.0, 3.0));

        // Exactly on the edge is a miss (strict test)
        let mut ball = ball_at(150.0, 440.0, Vec2::new(0.0, 3.0));
        assert!(!resolve_paddle_collision(&mut ball, &paddle));
    }

    #[test]
    fn test_brick_hit_scores_and_reflects() {
        let mut state = GameState::new(Tuning::default(), 1);
        // Brick (0, 1) spans x 95..150, y 60..80
        state.ball.pos = Vec2::new(120.0, 86.0);
        state.ball.vel = Vec2::new(0.0, -3.0);
        assert_eq!(resolve_brick_collision(&mut state), 1);
        assert_eq!(state.score, 10);
        assert_eq!(state.ball.vel.y, 3.0);
        assert!(!state.bricks.get(0, 1).is_some_and(|b| b.alive));
        assert_eq!(state.events, vec![GameEvent::BrickBroken { row: 0, column: 1 }]);

        // Broken bricks are ignored
        assert_eq!(resolve_brick_collision(&mut state), 0);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_double_hit_cancels_reflection() {
        let mut tuning = Tuning::default();
        tuning.bricks.offset_left = 5.0;
        let mut state = GameState::new(tuning, 1);
        // Straddles the 5px gap between bricks (0, 0) and (0, 1)
        state.ball.pos = Vec2::new(62.5, 70.0);
        state.ball.vel = Vec2::new(0.0, -3.0);
        assert_eq!(resolve_brick_collision(&mut state), 2);
        assert_eq!(state.score, 20);
        assert_eq!(state.ball.vel.y, -3.0);
    }

    #[test]
    fn test_score_saturates() {
        let mut tuning = Tuning::default();
        tuning.score_unit = u64::MAX;
        let mut state = GameState::new(tuning, 1);
        state.score = 1;
        state.ball.pos = Vec2::new(120.0, 86.0);
        assert_eq!(resolve_brick_collision(&mut state), 1);
        assert_eq!(state.score, u64::MAX);
    }

    #[test]
    fn test_brick_miss() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.ball.pos = Vec2::new(200.0, 200.0);
        assert_eq!(resolve_brick_collision(&mut state), 0);
        assert_eq!(state.bricks.alive_count(), 5);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_field(moves in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..400), step in 1.0f32..37.0) {
            let mut paddle = paddle_at(150.0);
            paddle.step = step;
            for (left, right) in moves {
                move_paddle(&mut paddle, &InputState { left, right }, 400.0);
                prop_assert!(paddle.pos.x >= 0.0);
                prop_assert!(paddle.pos.x <= 300.0);
            }
        }

        #[test]
        fn prop_paddle_bounce_preserves_speed(x in 150.5f32..249.5, speed in 1.0f32..20.0) {
            let paddle = paddle_at(150.0);
            let mut ball = ball_at(x, 440.0, Vec2::new(0.0, 3.0));
            ball.speed = speed;
            prop_assert!(resolve_paddle_collision(&mut ball, &paddle));
            prop_assert!((ball.vel.length() - speed).abs() < 1e-4 * speed);
            prop_assert!(ball.vel.y < 0.0);
        }
    }
}
