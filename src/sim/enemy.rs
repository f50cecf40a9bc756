//! Enemy AI and population management
//!
//! Enemies wander on random headings, flee when the player gets close, and
//! bounce off walls one axis at a time.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::can_occupy;
use super::grid::GridMap;
use super::state::{Enemy, GameState};
use crate::consts::*;
use crate::media::{SoundEffect, TAUNT_VARIANTS};
use crate::{bearing, heading};

/// Spawn the level's enemies by rejection sampling.
///
/// A slot that finds no valid position within `SPAWN_ATTEMPTS` is skipped, so
/// fewer than `state.enemy_target` enemies may appear. Returns the number spawned.
pub fn spawn_enemies(state: &mut GameState) -> usize {
    let target = state.enemy_target;
    let mut spawned = 0;
    for _ in 0..target {
        let Some(pos) = sample_spawn_point(&state.grid, state.player.pos, &mut state.rng) else {
            continue;
        };
        let move_speed = state.rng.random_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED);
        let move_timer = state.rng.random_range(0..INITIAL_DECISION_TICKS);
        state.enemies.push(Enemy::new(pos, move_speed, move_timer));
        spawned += 1;
    }

    if spawned < target {
        log::warn!("Spawned {} of {} enemies (no room for the rest)", spawned, target);
    } else {
        log::info!("Spawned {} enemies", spawned);
    }
    spawned
}

/// Random open position away from the player, or `None` after too many misses
fn sample_spawn_point(grid: &GridMap, player: Vec2, rng: &mut Pcg32) -> Option<Vec2> {
    if grid.width() == 0 || grid.height() == 0 {
        return None;
    }
    let w = grid.width() as f32;
    let h = grid.height() as f32;
    for _ in 0..SPAWN_ATTEMPTS {
        let pos = Vec2::new(rng.random_range(0.0..w), rng.random_range(0.0..h));
        let d = pos - player;
        if can_occupy(grid, pos) && d.x.abs() >= SPAWN_CLEARANCE && d.y.abs() >= SPAWN_CLEARANCE {
            return Some(pos);
        }
    }
    None
}

/// Pick a heading for an enemy at `pos`.
///
/// Too close to the player: flee straight away. Otherwise take `random_heading`,
/// unless a short lookahead along it ends up too close, in which case flee.
pub fn choose_heading(pos: Vec2, move_speed: f32, player: Vec2, random_heading: f32) -> f32 {
    let flee = bearing(player, pos);
    if pos.distance(player) < FLEE_DISTANCE {
        return flee;
    }
    let projected = pos + heading(random_heading) * move_speed * LOOKAHEAD_TICKS;
    if projected.distance(player) < LOOKAHEAD_MIN_DISTANCE {
        flee
    } else {
        random_heading
    }
}

/// Advance one enemy by a tick
pub fn update_enemy(enemy: &mut Enemy, grid: &GridMap, player: Vec2, rng: &mut Pcg32) {
    enemy.update_hit_flash();

    enemy.move_timer = enemy.move_timer.saturating_sub(1);
    if enemy.move_timer == 0 {
        let random_heading = rng.random_range(0.0..TAU);
        let h = choose_heading(enemy.pos, enemy.move_speed, player, random_heading);
        enemy.vel = heading(h) * enemy.move_speed;
        enemy.move_timer = rng.random_range(DECISION_MIN_TICKS..=DECISION_MAX_TICKS);
    }

    // X then Y, bouncing on the blocked axis
    let new_x = enemy.pos.x + enemy.vel.x;
    if can_occupy(grid, Vec2::new(new_x, enemy.pos.y)) {
        enemy.pos.x = new_x;
    } else {
        enemy.vel.x = -enemy.vel.x;
    }
    let new_y = enemy.pos.y + enemy.vel.y;
    if can_occupy(grid, Vec2::new(enemy.pos.x, new_y)) {
        enemy.pos.y = new_y;
    } else {
        enemy.vel.y = -enemy.vel.y;
    }
}

/// Damage the enemy at `index`; removes it immediately if that killed it.
/// Returns true on a kill.
pub fn strike(enemies: &mut Vec<Enemy>, index: usize) -> bool {
    let Some(enemy) = enemies.get_mut(index) else {
        return false;
    };
    enemy.hit();
    if enemy.is_dead() {
        enemies.remove(index);
        log::info!("Enemy defeated, {} remaining", enemies.len());
        return true;
    }
    false
}

/// Population tick: taunts, then every enemy's AI and movement
pub fn update_enemies(state: &mut GameState) {
    if !state.enemies.is_empty() {
        state.taunt_timer += 1;
        if state.taunt_timer >= TAUNT_INTERVAL_TICKS {
            state.taunt_timer = 0;
            let variant = state.rng.random_range(0..TAUNT_VARIANTS);
            state.request_sound(SoundEffect::Taunt(variant));
        }
    }

    let GameState {
        enemies,
        grid,
        player,
        rng,
        ..
    } = state;
    for enemy in enemies.iter_mut() {
        update_enemy(enemy, grid, player.pos, rng);
    }
}
