//! Read-only frame snapshot for renderers
//!
//! The simulation never touches display elements. Each frame a host builds a
//! [`FrameView`] and hands it to whatever [`Presenter`] it drives.

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::sim::grid::GridMap;
use crate::sim::sequence::{Phase, RenderTarget};
use crate::sim::state::{GameState, ProjectileMode};

/// Camera pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraView {
    pub pos: Vec2,
    pub angle: f32,
    pub eye_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    /// Draw with the hit-flash tint
    pub flashed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectileView {
    pub pos: Vec3,
    pub heading: f32,
    pub mode: ProjectileMode,
    pub tumble: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GateView {
    pub pos: Vec2,
    pub open: bool,
    pub lit: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView<'a> {
    pub time_ticks: u64,
    pub phase: Phase,
    pub target: RenderTarget,
    /// Intro black overlay (1 = black)
    pub fade_alpha: f32,
    pub text_alpha: f32,
    pub ending_fade_alpha: f32,
    pub hud_visible: bool,
    pub subtitle: Option<&'a str>,
    pub finale: bool,
    pub camera: CameraView,
    pub grid: &'a GridMap,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub gate: GateView,
}

impl<'a> FrameView<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        let seq = &state.sequencer;
        Self {
            time_ticks: state.time_ticks,
            phase: seq.phase,
            target: seq.render_target(),
            fade_alpha: seq.fade_alpha,
            text_alpha: seq.text_alpha,
            ending_fade_alpha: seq.ending_fade_alpha,
            hud_visible: seq.hud_visible(),
            subtitle: seq.subtitle(),
            finale: seq.finale,
            camera: CameraView {
                pos: state.player.pos,
                angle: state.player.angle,
                eye_height: state.player.eye_height(),
            },
            grid: &state.grid,
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    flashed: e.flashed,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    heading: p.heading,
                    mode: p.mode,
                    tumble: p.tumble,
                })
                .collect(),
            gate: GateView {
                pos: state.gate.pos,
                open: state.gate.is_open,
                lit: state.gate.flash_on,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Consumer of frame snapshots (renderer, recorder, bot)
pub trait Presenter {
    fn present(&mut self, view: &FrameView);
}
