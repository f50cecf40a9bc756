//! Player motion: instant turning, momentum, and wall sliding

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::collision::can_occupy;
use super::grid::GridMap;
use super::input::InputIntents;
use super::state::Player;
use crate::consts::MOVE_EPSILON;
use crate::heading;

/// Advance the player by one tick
pub fn update_player(player: &mut Player, grid: &GridMap, input: &InputIntents) {
    let t = player.tuning;

    // Turning has no momentum
    if input.turn_left {
        player.angle -= t.rotation_speed;
    }
    if input.turn_right {
        player.angle += t.rotation_speed;
    }
    player.angle += input.look_delta;

    let mut desired = Vec2::ZERO;
    if input.forward {
        desired += heading(player.angle) * t.max_speed;
    }
    if input.backward {
        desired -= heading(player.angle) * t.max_speed;
    }
    if input.strafe_left {
        desired += heading(player.angle - FRAC_PI_2) * t.max_speed;
    }
    if input.strafe_right {
        desired += heading(player.angle + FRAC_PI_2) * t.max_speed;
    }

    if input.any_movement() {
        player.vel += (desired - player.vel) * t.acceleration;
    } else {
        player.vel *= t.friction;
    }

    if player.vel.x.abs() > MOVE_EPSILON || player.vel.y.abs() > MOVE_EPSILON {
        apply_motion(player, grid);
    }
}

/// Move by the current velocity, sliding along walls.
///
/// Order is fixed: full move, then X-only, then Y-only, then stop.
fn apply_motion(player: &mut Player, grid: &GridMap) {
    let old = player.pos;
    let new = old + player.vel;

    if can_occupy(grid, new) {
        player.pos = new;
    } else if can_occupy(grid, Vec2::new(new.x, old.y)) {
        player.pos.x = new.x;
        player.vel.y = 0.0;
    } else if can_occupy(grid, Vec2::new(old.x, new.y)) {
        player.pos.y = new.y;
        player.vel.x = 0.0;
    } else {
        player.vel = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerTuning;
    use proptest::prelude::*;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), PlayerTuning::default())
    }

    fn forward() -> InputIntents {
        InputIntents {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_turning_is_instant() {
        let grid = GridMap::default();
        let mut p = player_at(8.0, 8.0);
        let input = InputIntents {
            turn_right: true,
            look_delta: 0.1,
            ..Default::default()
        };
        update_player(&mut p, &grid, &input);
        assert!((p.angle - (p.tuning.rotation_speed + 0.1)).abs() < 1e-6);
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_acceleration_approaches_max_speed() {
        let grid = GridMap::default();
        let mut p = player_at(4.0, 8.0);
        update_player(&mut p, &grid, &forward());
        // One tick closes `acceleration` of the gap
        assert!((p.vel.x - p.tuning.max_speed * p.tuning.acceleration).abs() < 1e-6);
        for _ in 0..30 {
            update_player(&mut p, &grid, &forward());
        }
        assert!(p.vel.x <= p.tuning.max_speed + 1e-6);
        assert!(p.vel.x > p.tuning.max_speed * 0.9);
    }

    #[test]
    fn test_strafe_directions() {
        let grid = GridMap::default();
        let mut left = player_at(8.0, 8.0);
        let mut right = player_at(8.0, 8.0);
        update_player(
            &mut left,
            &grid,
            &InputIntents {
                strafe_left: true,
                ..Default::default()
            },
        );
        update_player(
            &mut right,
            &grid,
            &InputIntents {
                strafe_right: true,
                ..Default::default()
            },
        );
        // Facing +x: left is -y, right is +y
        assert!(left.pos.y < 8.0);
        assert!(right.pos.y > 8.0);
    }

    #[test]
    fn test_slide_prefers_x_axis() {
        // Pillar at (10, 10): the diagonal move is blocked, each single-axis move is not
        let mut rows = vec![vec![0u8; 16]; 16];
        for i in 0..16 {
            rows[0][i] = 1;
            rows[15][i] = 1;
            rows[i][0] = 1;
            rows[i][15] = 1;
        }
        rows[10][10] = 1;
        let refs: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
        let grid = GridMap::from_rows(&refs);

        let start = Vec2::new(9.2, 9.2);
        let mut p = player_at(start.x, start.y);
        p.vel = Vec2::new(0.2, 0.2);
        let new = start + p.vel;
        assert!(!can_occupy(&grid, new));
        assert!(can_occupy(&grid, Vec2::new(new.x, start.y)));
        assert!(can_occupy(&grid, Vec2::new(start.x, new.y)));

        apply_motion(&mut p, &grid);
        assert_eq!(p.pos, Vec2::new(new.x, start.y));
        assert_eq!(p.vel.y, 0.0);
        assert_eq!(p.vel.x, 0.2);
    }

    #[test]
    fn test_fully_blocked_stops() {
        let grid = GridMap::default();
        let mut p = player_at(2.0, 2.0);
        p.vel = Vec2::new(-0.1, -0.1);
        apply_motion(&mut p, &grid);
        assert_eq!(p.pos, Vec2::new(2.0, 2.0));
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_wall_never_entered() {
        let grid = GridMap::default();
        let mut p = player_at(8.0, 8.0);
        for _ in 0..600 {
            update_player(&mut p, &grid, &forward());
            assert!(can_occupy(&grid, p.pos));
        }
        assert!(p.pos.x <= 14.0 + 1e-4);
    }

    proptest! {
        #[test]
        fn prop_friction_decay_is_monotone(vx in -0.15f32..0.15, vy in -0.15f32..0.15, ticks in 1usize..200) {
            let grid = GridMap::default();
            let mut p = player_at(8.0, 8.0);
            p.vel = Vec2::new(vx, vy);
            let idle = InputIntents::default();
            let mut last = p.vel.length();
            for _ in 0..ticks {
                update_player(&mut p, &grid, &idle);
                let speed = p.vel.length();
                prop_assert!(speed <= last);
                last = speed;
            }
            prop_assert!(last <= (vx.hypot(vy)) * p.tuning.friction.powi(ticks as i32) + 1e-6);
        }
    }
}
