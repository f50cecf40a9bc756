//! Exit gate: opens once the room is clear, ends the level on contact

use super::state::GameState;
use crate::consts::*;
use crate::media::SoundEffect;

/// Advance the gate by one tick
pub fn update_gate(state: &mut GameState) {
    if state.enemies.is_empty() && !state.gate.is_open {
        state.gate.is_open = true;
        state.gate.flash_timer = 0;
        state.gate.flash_on = false;
        state.grid.open_passage(&[PASSAGE_CELL]);
        state.request_sound(SoundEffect::DoorOpen);
        log::info!("Room cleared, exit open");
    }

    if !state.gate.is_open {
        return;
    }

    state.gate.flash_timer += 1;
    if state.gate.flash_timer >= GATE_FLASH_TICKS {
        state.gate.flash_timer = 0;
        state.gate.flash_on = !state.gate.flash_on;
    }

    let near = state.player.pos.distance(state.gate.pos) < EXIT_TRIGGER_DISTANCE;
    if near && state.enemies.is_empty() && state.sequencer.begin_ending() {
        state.request_sound(SoundEffect::DoorClose);
    }
}
