//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (enemy and projectile insertion order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod enemy;
pub mod gate;
pub mod grid;
pub mod input;
pub mod player;
pub mod projectile;
pub mod sequence;
pub mod state;
pub mod tick;

pub use collision::{blocked_axes, can_occupy};
pub use grid::{Cell, GridMap};
pub use input::{InputIntents, InputSource, ScriptedInput};
pub use sequence::{Phase, RenderTarget, Sequencer, SubtitleCue};
pub use state::{Enemy, ExitGate, GameState, Player, Projectile, ProjectileMode};
pub use tick::tick;
