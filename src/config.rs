//! Game settings and tuning
//!
//! Loaded from a JSON file next to the binary (native) or handed over by the
//! JS host (web). Missing fields fall back to the reference tuning.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::sequence::SubtitleCue;

/// Largest enemy count accepted from a config file
pub const MAX_ENEMY_COUNT: usize = 64;

/// Error type for settings loading
#[derive(Debug)]
pub enum ConfigError {
    /// File I/O error
    Io(String),
    /// JSON parse error
    Parse(String),
    /// Value out of range
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Player movement tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Top speed per tick along any single intent
    pub max_speed: f32,
    /// Fraction of the velocity error closed per tick while input is held
    pub acceleration: f32,
    /// Velocity multiplier per tick with no input
    pub friction: f32,
    /// Radians per tick while a turn key is held
    pub rotation_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_speed: PLAYER_MAX_SPEED,
            acceleration: PLAYER_ACCELERATION,
            friction: PLAYER_FRICTION,
            rotation_speed: PLAYER_ROTATION_SPEED,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; `None` picks one at startup
    pub seed: Option<u64>,
    /// Enemies requested at level start
    pub enemy_count: usize,
    pub player: PlayerTuning,
    /// Radians per pixel of pointer motion, see `Session::pointer_look`
    pub mouse_sensitivity: f32,
    /// Subtitle track for the ending cinematic
    pub subtitles: Vec<SubtitleCue>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            enemy_count: ENEMY_COUNT,
            player: PlayerTuning::default(),
            mouse_sensitivity: MOUSE_SENSITIVITY,
            subtitles: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        if !(p.acceleration > 0.0 && p.acceleration <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "player.acceleration must be in (0, 1], got {}",
                p.acceleration
            )));
        }
        if !(p.friction > 0.0 && p.friction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "player.friction must be in (0, 1], got {}",
                p.friction
            )));
        }
        if !(p.max_speed > 0.0) || !(p.rotation_speed >= 0.0) {
            return Err(ConfigError::Invalid(
                "player speeds must be positive".to_string(),
            ));
        }
        if self.enemy_count > MAX_ENEMY_COUNT {
            return Err(ConfigError::Invalid(format!(
                "enemy_count {} exceeds {}",
                self.enemy_count, MAX_ENEMY_COUNT
            )));
        }
        if let Some(cue) = self.subtitles.iter().find(|c| c.start > c.end) {
            return Err(ConfigError::Invalid(format!(
                "subtitle cue starts after it ends ({} > {})",
                cue.start, cue.end
            )));
        }
        Ok(())
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }
}
