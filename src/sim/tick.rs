//! Fixed timestep simulation tick
//!
//! The sequencer phase decides which subsystems own the tick. World updates run
//! in a fixed order: player, projectiles, enemies, gate.

use super::enemy::{spawn_enemies, update_enemies};
use super::gate::update_gate;
use super::input::InputIntents;
use super::player::update_player;
use super::projectile::{fire, update_projectiles};
use super::sequence::Phase;
use super::state::GameState;
use crate::media::{self, MediaRequest, MediaSink, VideoClip};

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &InputIntents, media: &mut dyn MediaSink) {
    state.time_ticks += 1;

    match state.sequencer.phase {
        Phase::Intro | Phase::WaitingForInput | Phase::FadingIn => {
            if state.sequencer.advance_intro(input) {
                spawn_enemies(state);
            }
        }
        Phase::Gameplay | Phase::EndingFading => {
            update_world(state, input);
            if state.sequencer.advance_ending_fade() {
                state.request(MediaRequest::Video(VideoClip::Ending));
            }
        }
        Phase::EndingVideo => {
            state
                .sequencer
                .update_cinematic(media.video_position(VideoClip::Ending));
        }
    }

    media::dispatch(&mut state.pending_media, media);
}

fn update_world(state: &mut GameState, input: &InputIntents) {
    update_player(&mut state.player, &state.grid, input);
    if input.fire {
        fire(state);
    }
    update_projectiles(state);
    update_enemies(state);
    update_gate(state);
}
