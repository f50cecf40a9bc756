//! Per-tick input intents
//!
//! The simulation never reads devices. A host (keyboard/pointer capture, a
//! script, the autopilot) produces one `InputIntents` snapshot per tick.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputIntents {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Fire / click (one-shot)
    pub fire: bool,
    /// Pointer look delta in radians, added straight to the facing angle
    pub look_delta: f32,
}

impl InputIntents {
    /// Any translation intent (forward/backward/strafe)
    pub fn any_movement(&self) -> bool {
        self.forward || self.backward || self.strafe_left || self.strafe_right
    }

    /// Any movement or turn intent
    pub fn any_motion(&self) -> bool {
        self.any_movement() || self.turn_left || self.turn_right
    }

    /// Clear one-shot inputs after they have been consumed by a tick
    pub fn clear_one_shots(&mut self) {
        self.fire = false;
        self.look_delta = 0.0;
    }

    /// Fold a newer snapshot in: held keys follow `latest`, one-shots that no
    /// tick has consumed yet are kept and accumulated.
    pub fn absorb(&mut self, latest: InputIntents) {
        let fire = self.fire || latest.fire;
        let look_delta = self.look_delta + latest.look_delta;
        *self = InputIntents {
            fire,
            look_delta,
            ..latest
        };
    }
}

/// Polling interface implemented by whatever host layer produces input
pub trait InputSource {
    fn snapshot(&mut self) -> InputIntents;
}

/// Replays a fixed queue of intents, then reports idle forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<InputIntents>,
}

impl ScriptedInput {
    pub fn new(intents: impl IntoIterator<Item = InputIntents>) -> Self {
        Self {
            queue: intents.into_iter().collect(),
        }
    }

    /// Queue `ticks` copies of the same intents
    pub fn hold(&mut self, intents: InputIntents, ticks: usize) -> &mut Self {
        self.queue.extend(std::iter::repeat_n(intents, ticks));
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn snapshot(&mut self) -> InputIntents {
        self.queue.pop_front().unwrap_or_default()
    }
}
