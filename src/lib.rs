//! Away Team - a single-room first-person shooter minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, enemy AI, projectiles, sequencer)
//! - `media`: Fire-and-forget sound/video requests to an external player
//! - `view`: Read-only frame snapshot for an external renderer
//! - `session`: Fixed-step host driver
//! - `config`: Data-driven tuning loaded from JSON

pub mod autopilot;
pub mod config;
pub mod media;
pub mod session;
pub mod sim;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{ConfigError, Settings};
pub use session::Session;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per display refresh at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Room dimensions (cells)
    pub const MAP_WIDTH: usize = 16;
    pub const MAP_HEIGHT: usize = 16;

    /// Player defaults
    pub const PLAYER_SPAWN: (f32, f32) = (8.0, 8.0);
    pub const PLAYER_EYE_HEIGHT: f32 = 1.0;
    pub const PLAYER_MAX_SPEED: f32 = 0.15;
    pub const PLAYER_ACCELERATION: f32 = 0.1;
    pub const PLAYER_FRICTION: f32 = 0.85;
    pub const PLAYER_ROTATION_SPEED: f32 = 0.05;
    /// Below this per-axis speed the player is considered stopped
    pub const MOVE_EPSILON: f32 = 0.0001;
    /// Radians of look per pixel of pointer motion (host-side conversion)
    pub const MOUSE_SENSITIVITY: f32 = 0.002;

    /// Collision footprint radius (world units)
    pub const COLLISION_RADIUS: f32 = 1.0;

    /// Enemy defaults
    pub const ENEMY_COUNT: usize = 5;
    pub const ENEMY_HEALTH: i32 = 2;
    pub const SPAWN_ATTEMPTS: u32 = 50;
    /// Minimum per-axis distance from the player at spawn
    pub const SPAWN_CLEARANCE: f32 = 2.0;
    pub const ENEMY_MIN_SPEED: f32 = 0.01;
    pub const ENEMY_MAX_SPEED: f32 = 0.025;
    /// Enemies closer than this flee the player
    pub const FLEE_DISTANCE: f32 = 3.0;
    /// Random headings are rejected if they end up closer than this
    pub const LOOKAHEAD_MIN_DISTANCE: f32 = 2.0;
    pub const LOOKAHEAD_TICKS: f32 = 10.0;
    pub const DECISION_MIN_TICKS: u32 = 60;
    pub const DECISION_MAX_TICKS: u32 = 180;
    pub const INITIAL_DECISION_TICKS: u32 = 60;
    pub const HIT_FLASH_TICKS: u32 = 30;
    /// Ticks between enemy taunts (3 seconds)
    pub const TAUNT_INTERVAL_TICKS: u32 = 180;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 0.15;
    pub const PROJECTILE_HIT_RADIUS: f32 = 1.0;
    pub const PROJECTILE_GRAVITY: f32 = 0.01;
    pub const PROJECTILE_FRICTION: f32 = 0.98;
    pub const PROJECTILE_FLOOR_HEIGHT: f32 = 0.1;
    /// Horizontal speed kept (and reversed) on a wall bounce
    pub const PROJECTILE_BOUNCE: f32 = 0.5;
    /// Maximum tumble added per axis on impact (radians, either direction)
    pub const PROJECTILE_TUMBLE: f32 = 0.25;
    /// Live projectile count that triggers the unbounded-growth warning
    pub const PROJECTILE_WARN_COUNT: usize = 512;

    /// Exit gate
    pub const EXIT_POINT: (f32, f32) = (8.0, 14.0);
    pub const EXIT_TRIGGER_DISTANCE: f32 = 1.5;
    pub const GATE_FLASH_TICKS: u32 = 15;
    /// Wall cell opened when the room is cleared
    pub const PASSAGE_CELL: (i32, i32) = (15, 8);

    /// Intro / ending sequencing
    pub const INTRO_FADE_STEP: f32 = 0.02;
    pub const INTRO_TEXT_DELAY_TICKS: u32 = 120;
    pub const INTRO_TEXT_STEP: f32 = 0.02;
    pub const INTRO_MIN_TICKS: u32 = 180;
    pub const FADE_IN_STEP: f32 = 0.03;
    pub const ENDING_FADE_STEP: f32 = 0.02;
    /// Playback position (seconds) where the ending cinematic is held
    pub const ENDING_HOLD_SECS: f32 = 106.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector for a facing angle (0 = +x, π/2 = +y)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of the vector from `from` to `to`
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
