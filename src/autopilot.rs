//! Autopilot: plays the game from frame snapshots
//!
//! Used by the headless native build and as a demo mode. It only sees what a
//! renderer sees ([`FrameView`]) and only acts through [`InputIntents`].

use glam::Vec2;

use crate::sim::input::{InputIntents, InputSource};
use crate::sim::sequence::Phase;
use crate::view::{FrameView, Presenter};
use crate::{bearing, normalize_angle};

/// Facing error (radians) considered lined up with a target
const AIM_TOLERANCE: f32 = 0.05;
/// Ticks between shots
const FIRE_COOLDOWN: u32 = 30;
/// Stop closing in on an enemy inside this distance
const ENGAGE_DISTANCE: f32 = 4.0;

#[derive(Debug, Clone, Copy)]
struct Observation {
    phase: Phase,
    pos: Vec2,
    angle: f32,
    nearest_enemy: Option<Vec2>,
    gate: Vec2,
    gate_open: bool,
}

#[derive(Debug, Default)]
pub struct Autopilot {
    last: Option<Observation>,
    cooldown: u32,
    shots: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projectiles fired so far
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Turn toward `target`; returns true once lined up
    fn steer(obs: &Observation, target: Vec2, intents: &mut InputIntents) -> bool {
        let error = normalize_angle(bearing(obs.pos, target) - obs.angle);
        if error.abs() <= AIM_TOLERANCE {
            return true;
        }
        if error > 0.0 {
            intents.turn_right = true;
        } else {
            intents.turn_left = true;
        }
        false
    }
}

impl Presenter for Autopilot {
    fn present(&mut self, view: &FrameView) {
        let pos = view.camera.pos;
        let nearest_enemy = view
            .enemies
            .iter()
            .map(|e| e.pos)
            .min_by(|a, b| {
                a.distance_squared(pos)
                    .partial_cmp(&b.distance_squared(pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        self.last = Some(Observation {
            phase: view.phase,
            pos,
            angle: view.camera.angle,
            nearest_enemy,
            gate: view.gate.pos,
            gate_open: view.gate.open,
        });
    }
}

impl InputSource for Autopilot {
    fn snapshot(&mut self) -> InputIntents {
        let mut intents = InputIntents::default();
        let Some(obs) = self.last else {
            return intents;
        };
        self.cooldown = self.cooldown.saturating_sub(1);

        match obs.phase {
            Phase::WaitingForInput => intents.fire = true,
            Phase::Gameplay => {
                if let Some(enemy) = obs.nearest_enemy {
                    let aligned = Self::steer(&obs, enemy, &mut intents);
                    if aligned && self.cooldown == 0 {
                        intents.fire = true;
                        self.cooldown = FIRE_COOLDOWN;
                        self.shots += 1;
                    }
                    if aligned && obs.pos.distance(enemy) > ENGAGE_DISTANCE {
                        intents.forward = true;
                    }
                } else if obs.gate_open && Self::steer(&obs, obs.gate, &mut intents) {
                    intents.forward = true;
                }
            }
            _ => {}
        }
        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, GameState};
    use std::f32::consts::FRAC_PI_2;

    fn observe(pilot: &mut Autopilot, state: &GameState) {
        pilot.present(&FrameView::capture(state));
    }

    #[test]
    fn test_idle_before_first_frame() {
        let mut pilot = Autopilot::new();
        assert_eq!(pilot.snapshot(), InputIntents::default());
    }

    #[test]
    fn test_clicks_through_title() {
        let mut pilot = Autopilot::new();
        let mut state = GameState::new(1);
        state.sequencer.phase = Phase::WaitingForInput;
        observe(&mut pilot, &state);
        assert!(pilot.snapshot().fire);
    }

    #[test]
    fn test_turns_then_fires() {
        let mut pilot = Autopilot::new();
        let mut state = GameState::new(1);
        state.sequencer.phase = Phase::Gameplay;
        state.enemies.push(Enemy::new(Vec2::new(8.0, 11.0), 0.0, 100));

        observe(&mut pilot, &state);
        let intents = pilot.snapshot();
        assert!(intents.turn_right);
        assert!(!intents.fire);

        state.player.angle = FRAC_PI_2;
        observe(&mut pilot, &state);
        let intents = pilot.snapshot();
        assert!(intents.fire);
        // Cooling down
        assert!(!pilot.snapshot().fire);
        assert_eq!(pilot.shots(), 1);
    }

    #[test]
    fn test_heads_for_open_exit() {
        let mut pilot = Autopilot::new();
        let mut state = GameState::new(1);
        state.sequencer.phase = Phase::Gameplay;
        state.gate.is_open = true;
        state.player.angle = FRAC_PI_2;
        observe(&mut pilot, &state);
        let intents = pilot.snapshot();
        assert!(intents.forward);
        assert!(!intents.fire);
    }
}
