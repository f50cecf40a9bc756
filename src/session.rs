//! Fixed-step host driver
//!
//! Hosts call [`Session::advance`] once per display frame with the real elapsed
//! time. The session runs as many fixed ticks as that time covers, capped so a
//! long stall cannot snowball.

use crate::config::Settings;
use crate::consts::*;
use crate::media::MediaSink;
use crate::sim::input::{InputIntents, InputSource};
use crate::sim::state::GameState;
use crate::sim::tick::tick;
use crate::view::{FrameView, Presenter};

/// Longest frame time fed to the accumulator (seconds)
const MAX_FRAME_DT: f32 = 0.1;

pub struct Session<M: MediaSink> {
    state: GameState,
    media: M,
    accumulator: f32,
    /// Latest intents plus one-shots no tick has consumed yet
    input: InputIntents,
    /// Radians of look per pixel of pointer motion
    mouse_sensitivity: f32,
}

impl<M: MediaSink> Session<M> {
    pub fn new(seed: u64, media: M) -> Self {
        Self::with_settings(seed, &Settings::default(), media)
    }

    pub fn with_settings(seed: u64, settings: &Settings, media: M) -> Self {
        log::info!("Session starting with seed {}", seed);
        Self {
            state: GameState::with_settings(seed, settings),
            media,
            accumulator: 0.0,
            input: InputIntents::default(),
            mouse_sensitivity: settings.mouse_sensitivity,
        }
    }

    /// Run the ticks covered by `dt` seconds. Returns the number of ticks run.
    ///
    /// Input is sampled once per call. One-shot intents (fire, look) apply to the
    /// first tick that runs, even if that is a later call.
    pub fn advance(&mut self, dt: f32, source: &mut dyn InputSource) -> u32 {
        let dt = if dt.is_finite() { dt } else { 0.0 };
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        self.input.absorb(source.snapshot());

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, &mut self.media);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.input.clear_one_shots();
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than carry it into the next frame
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Convert horizontal pointer motion (pixels) to a look delta (radians)
    pub fn pointer_look(&self, dx_pixels: f32) -> f32 {
        dx_pixels * self.mouse_sensitivity
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView::capture(&self.state)
    }

    pub fn present(&self, presenter: &mut dyn Presenter) {
        presenter.present(&self.view());
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }
}
