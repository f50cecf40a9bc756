//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there is no ambient
//! global state. Renderers read it through [`crate::view::FrameView`].

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::GridMap;
use super::sequence::Sequencer;
use crate::config::{PlayerTuning, Settings};
use crate::consts::*;
use crate::media::{MediaRequest, SoundEffect};

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle (radians, 0 = +x)
    pub angle: f32,
    /// Velocity per tick
    pub vel: Vec2,
    pub tuning: PlayerTuning,
}

impl Player {
    pub fn new(pos: Vec2, tuning: PlayerTuning) -> Self {
        Self {
            pos,
            angle: 0.0,
            vel: Vec2::ZERO,
            tuning,
        }
    }

    /// Camera height above the floor
    pub fn eye_height(&self) -> f32 {
        PLAYER_EYE_HEIGHT
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::from(PLAYER_SPAWN), PlayerTuning::default())
    }
}

/// A wandering enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks until the next heading decision
    pub move_timer: u32,
    /// Speed per tick, fixed at spawn
    pub move_speed: f32,
    pub health: i32,
    /// Ticks of hit-flash remaining
    pub hit_timer: u32,
    /// Hit-flash visual state
    pub flashed: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, move_speed: f32, move_timer: u32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            move_timer,
            move_speed,
            health: ENEMY_HEALTH,
            hit_timer: 0,
            flashed: false,
        }
    }

    /// Take one point of damage and start the hit flash
    pub fn hit(&mut self) {
        self.health -= 1;
        self.hit_timer = HIT_FLASH_TICKS;
        self.flashed = true;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Count down the hit flash; clears the visual flag when it runs out
    pub fn update_hit_flash(&mut self) {
        if self.hit_timer > 0 {
            self.hit_timer -= 1;
            if self.hit_timer == 0 {
                self.flashed = false;
            }
        }
    }
}

/// Projectile motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileMode {
    /// Flying straight at constant velocity
    Guided,
    /// After an impact: gravity, friction and bounces
    FreePhysics,
}

/// A fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// x, y on the floor plane; z is height
    pub pos: Vec3,
    /// x, y horizontal per tick; z is vertical speed (free physics only)
    pub vel: Vec3,
    /// Facing angle at launch
    pub heading: f32,
    pub mode: ProjectileMode,
    /// Accumulated cosmetic rotation from impacts
    pub tumble: Vec3,
}

impl Projectile {
    pub fn new(origin: Vec2, height: f32, heading: f32, speed: f32) -> Self {
        let dir = crate::heading(heading) * speed;
        Self {
            pos: origin.extend(height),
            vel: Vec3::new(dir.x, dir.y, 0.0),
            heading,
            mode: ProjectileMode::Guided,
            tumble: Vec3::ZERO,
        }
    }

    pub fn is_guided(&self) -> bool {
        self.mode == ProjectileMode::Guided
    }

    /// Switch to free physics. There is no way back.
    pub fn release(&mut self) {
        if self.mode == ProjectileMode::Guided {
            self.mode = ProjectileMode::FreePhysics;
            self.vel.z = 0.0;
        }
    }
}

/// The exit trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitGate {
    pub pos: Vec2,
    pub is_open: bool,
    pub flash_timer: u32,
    /// true = lit, false = idle colour
    pub flash_on: bool,
}

impl Default for ExitGate {
    fn default() -> Self {
        Self {
            pos: Vec2::from(EXIT_POINT),
            is_open: false,
            flash_timer: 0,
            flash_on: false,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub grid: GridMap,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub gate: ExitGate,
    pub sequencer: Sequencer,
    /// Enemies requested when the level starts
    pub enemy_target: usize,
    /// Ticks since the last taunt
    pub taunt_timer: u32,
    /// Media requests raised this tick, flushed by the orchestrator
    #[serde(skip)]
    pub pending_media: Vec<MediaRequest>,
    /// Projectile growth warning already logged
    #[serde(skip)]
    pub(crate) growth_warned: bool,
}

impl GameState {
    /// Create a new game state with the given seed and reference tuning
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            grid: GridMap::default(),
            player: Player::new(Vec2::from(PLAYER_SPAWN), settings.player),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            gate: ExitGate::default(),
            sequencer: Sequencer::new(settings.subtitles.clone()),
            enemy_target: settings.enemy_count,
            taunt_timer: 0,
            pending_media: Vec::new(),
            growth_warned: false,
        }
    }

    /// Queue a sound for the media host
    pub fn request_sound(&mut self, effect: SoundEffect) {
        self.pending_media.push(MediaRequest::Sound(effect));
    }

    pub fn request(&mut self, request: MediaRequest) {
        self.pending_media.push(request);
    }
}
