//! Projectile system: guided flight, enemy hits, then ballistic tumbling
//!
//! A projectile flies straight until it hits a wall or an enemy. From then on it
//! is a physics object that falls, skids and bounces until it rests on the floor.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::blocked_axes;
use super::enemy::strike;
use super::grid::GridMap;
use super::state::{GameState, Projectile};
use crate::consts::*;
use crate::media::{MediaRequest, STRUCK_VARIANTS, SoundEffect};

/// Launch a projectile from the player's eye along the facing direction
pub fn fire(state: &mut GameState) {
    let p = &state.player;
    let projectile = Projectile::new(p.pos, p.eye_height(), p.angle, PROJECTILE_SPEED);
    state.projectiles.push(projectile);
    state.request_sound(SoundEffect::Phaser);
}

/// Advance every projectile by one tick
pub fn update_projectiles(state: &mut GameState) {
    for i in 0..state.projectiles.len() {
        if state.projectiles[i].is_guided() {
            update_guided(state, i);
        } else {
            let GameState {
                projectiles,
                grid,
                rng,
                ..
            } = &mut *state;
            update_free(&mut projectiles[i], grid, rng);
        }
    }

    if !state.growth_warned && state.projectiles.len() >= PROJECTILE_WARN_COUNT {
        state.growth_warned = true;
        log::warn!(
            "{} projectiles alive; spent projectiles are never removed",
            state.projectiles.len()
        );
    }
}

fn update_guided(state: &mut GameState, index: usize) {
    let GameState {
        projectiles,
        grid,
        rng,
        enemies,
        pending_media,
        ..
    } = &mut *state;
    let p = &mut projectiles[index];

    let from = p.pos.truncate();
    let next = from + p.vel.truncate();
    if grid.is_wall_at(next) {
        // Stays at its last open position
        let (bx, by) = blocked_axes(grid, from, next);
        reflect(p, bx, by);
        add_tumble(p, rng);
        p.release();
        return;
    }
    p.pos.x = next.x;
    p.pos.y = next.y;

    // Newest enemy first
    let Some(target) = enemies
        .iter()
        .rposition(|e| e.pos.distance(next) < PROJECTILE_HIT_RADIUS)
    else {
        return;
    };
    strike(enemies, target);
    let variant = rng.random_range(0..STRUCK_VARIANTS);
    pending_media.push(MediaRequest::Sound(SoundEffect::EnemyStruck(variant)));
    p.release();
}

fn update_free(p: &mut Projectile, grid: &GridMap, rng: &mut Pcg32) {
    let was_airborne = p.pos.z > PROJECTILE_FLOOR_HEIGHT;

    p.vel.z -= PROJECTILE_GRAVITY;
    p.pos.z += p.vel.z;
    p.vel.x *= PROJECTILE_FRICTION;
    p.vel.y *= PROJECTILE_FRICTION;

    let from = p.pos.truncate();
    let to = from + p.vel.truncate();
    let (bx, by) = blocked_axes(grid, from, to);
    if !bx {
        p.pos.x = to.x;
    }
    if !by {
        p.pos.y = to.y;
    }
    if bx || by {
        reflect(p, bx, by);
        add_tumble(p, rng);
    }

    if p.pos.z <= PROJECTILE_FLOOR_HEIGHT {
        p.pos.z = PROJECTILE_FLOOR_HEIGHT;
        p.vel.z = 0.0;
        if was_airborne {
            add_tumble(p, rng);
        }
    }
}

/// Reverse and damp the blocked horizontal components
fn reflect(p: &mut Projectile, x_blocked: bool, y_blocked: bool) {
    if x_blocked {
        p.vel.x *= -PROJECTILE_BOUNCE;
    }
    if y_blocked {
        p.vel.y *= -PROJECTILE_BOUNCE;
    }
}

fn add_tumble(p: &mut Projectile, rng: &mut Pcg32) {
    p.tumble += Vec3::new(
        rng.random_range(-PROJECTILE_TUMBLE..PROJECTILE_TUMBLE),
        rng.random_range(-PROJECTILE_TUMBLE..PROJECTILE_TUMBLE),
        rng.random_range(-PROJECTILE_TUMBLE..PROJECTILE_TUMBLE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, ProjectileMode};
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn still_enemy(x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y), 0.0, 10_000)
    }

    #[test]
    fn test_fire_spawns_at_eye() {
        let mut state = GameState::new(1);
        state.player.angle = FRAC_PI_2;
        fire(&mut state);
        let p = &state.projectiles[0];
        assert_eq!(p.pos, Vec3::new(8.0, 8.0, PLAYER_EYE_HEIGHT));
        assert!((p.vel.y - PROJECTILE_SPEED).abs() < 1e-6);
        assert!(p.is_guided());
        assert_eq!(
            state.pending_media,
            vec![MediaRequest::Sound(SoundEffect::Phaser)]
        );
    }

    #[test]
    fn test_guided_flight_is_straight() {
        let mut state = GameState::new(1);
        fire(&mut state);
        for _ in 0..10 {
            update_projectiles(&mut state);
        }
        let p = &state.projectiles[0];
        assert!(p.is_guided());
        assert!((p.pos.x - (8.0 + 10.0 * PROJECTILE_SPEED)).abs() < 1e-4);
        assert_eq!(p.pos.y, 8.0);
        assert_eq!(p.pos.z, PLAYER_EYE_HEIGHT);
    }

    #[test]
    fn test_hit_damages_and_releases() {
        let mut state = GameState::new(1);
        // Both come within reach on the same tick
        state.enemies.push(still_enemy(9.5, 8.0));
        state.enemies.push(still_enemy(9.5, 8.2));
        fire(&mut state);
        state.pending_media.clear();

        let mut ticks = 0;
        while state.projectiles[0].is_guided() {
            update_projectiles(&mut state);
            ticks += 1;
            assert!(ticks < 20);
        }
        // Only the last in the list takes the hit
        assert_eq!(state.enemies[0].health, ENEMY_HEALTH);
        assert!(!state.enemies[0].flashed);
        assert_eq!(state.enemies[1].health, ENEMY_HEALTH - 1);
        assert!(state.enemies[1].flashed);
        assert!(matches!(
            state.pending_media.as_slice(),
            [MediaRequest::Sound(SoundEffect::EnemyStruck(_))]
        ));
    }

    #[test]
    fn test_killing_hit_removes_enemy() {
        let mut state = GameState::new(1);
        let mut enemy = still_enemy(9.5, 8.0);
        enemy.health = 1;
        state.enemies.push(enemy);
        fire(&mut state);
        for _ in 0..20 {
            update_projectiles(&mut state);
        }
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_wall_impact_stays_open_and_bounces() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(14.0, 8.0);
        fire(&mut state);
        let mut ticks = 0;
        while state.projectiles[0].is_guided() {
            update_projectiles(&mut state);
            ticks += 1;
            assert!(ticks < 20);
        }
        let p = &state.projectiles[0];
        assert!(!state.grid.is_wall_at(p.pos.truncate()));
        assert!(p.vel.x < 0.0);
        assert!((p.vel.x + PROJECTILE_SPEED * PROJECTILE_BOUNCE).abs() < 1e-6);
        assert_ne!(p.tumble, Vec3::ZERO);
    }

    #[test]
    fn test_free_physics_settles_on_floor() {
        let mut state = GameState::new(1);
        let mut p = Projectile::new(Vec2::new(8.0, 8.0), 1.0, 0.3, PROJECTILE_SPEED);
        p.release();
        state.projectiles.push(p);
        for _ in 0..600 {
            update_projectiles(&mut state);
            let p = &state.projectiles[0];
            assert!(p.pos.z >= PROJECTILE_FLOOR_HEIGHT);
            assert!(!state.grid.is_wall_at(p.pos.truncate()));
        }
        let p = &state.projectiles[0];
        assert_eq!(p.pos.z, PROJECTILE_FLOOR_HEIGHT);
        assert_eq!(p.vel.z, 0.0);
        assert!(p.vel.truncate().length() < 1e-3);
        assert_eq!(p.mode, ProjectileMode::FreePhysics);
    }

    #[test]
    fn test_growth_warning_once() {
        let mut state = GameState::new(1);
        for _ in 0..PROJECTILE_WARN_COUNT {
            let mut p = Projectile::new(Vec2::new(8.0, 8.0), 0.1, 0.0, 0.0);
            p.release();
            state.projectiles.push(p);
        }
        update_projectiles(&mut state);
        assert!(state.growth_warned);
        assert_eq!(state.projectiles.len(), PROJECTILE_WARN_COUNT);
    }

    proptest! {
        #[test]
        fn prop_released_projectiles_never_return_to_guided(
            seed in 0u64..1000,
            angle in 0.0f32..std::f32::consts::TAU,
            ticks in 1usize..300,
        ) {
            let mut state = GameState::new(seed);
            state.player.angle = angle;
            fire(&mut state);
            let mut released = false;
            for _ in 0..ticks {
                update_projectiles(&mut state);
                let guided = state.projectiles[0].is_guided();
                prop_assert!(!(released && guided));
                released |= !guided;
            }
        }
    }
}
