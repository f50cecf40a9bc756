//! Browser bindings
//!
//! The JS host owns the canvas, audio and video elements. Each animation frame it
//! passes elapsed time and the current intents, reads back a JSON frame view, and
//! plays whatever media the tick requested.

use wasm_bindgen::prelude::*;

use crate::config::Settings;
use crate::media::QueuedMedia;
use crate::session::Session;
use crate::sim::input::{InputIntents, ScriptedInput};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        // Already installed (hot reload)
        log::warn!("console logger not installed: {}", e);
    }
    log::info!("Away Team starting...");
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WasmSession {
    session: Session<QueuedMedia>,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WasmSession {
        WasmSession {
            session: Session::new(seed, QueuedMedia::new()),
        }
    }

    /// Build a session from a settings JSON document
    pub fn with_settings(seed: u64, settings_json: &str) -> Result<WasmSession, JsValue> {
        let settings = Settings::from_json(settings_json).map_err(js_err)?;
        Ok(WasmSession {
            session: Session::with_settings(seed, &settings, QueuedMedia::new()),
        })
    }

    /// Advance by `dt` seconds with the given intents and the pointer's
    /// horizontal motion in pixels since the last frame. Returns ticks run.
    pub fn tick_frame(
        &mut self,
        dt: f32,
        intents_json: &str,
        pointer_dx: f32,
    ) -> Result<u32, JsValue> {
        let mut intents: InputIntents = serde_json::from_str(intents_json).map_err(js_err)?;
        intents.look_delta += self.session.pointer_look(pointer_dx);
        let mut source = ScriptedInput::new([intents]);
        Ok(self.session.advance(dt, &mut source))
    }

    pub fn view_json(&self) -> Result<String, JsValue> {
        self.session.view().to_json().map_err(js_err)
    }

    /// Media requests since the last call, as a JSON array
    pub fn drain_media_json(&mut self) -> Result<String, JsValue> {
        let requests = self.session.media_mut().drain();
        serde_json::to_string(&requests).map_err(js_err)
    }

    /// Report the ending video's playback position; negative means not playing
    pub fn set_video_position(&mut self, secs: f32) {
        let position = (secs >= 0.0).then_some(secs);
        self.session.media_mut().set_video_position(position);
    }
}
