//! Top-level sequencer: intro, gameplay, ending
//!
//! Owns which subsystem runs each tick and which render target the host should
//! show. All timing is in ticks except the cinematic, which follows the external
//! video clock.

use serde::{Deserialize, Serialize};

use super::input::InputIntents;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title card fading in over the star field
    Intro,
    /// Title shown, waiting for any movement key or a click
    WaitingForInput,
    /// Fading to black before the room appears
    FadingIn,
    /// Active gameplay
    Gameplay,
    /// Player reached the exit, screen fading to black
    EndingFading,
    /// Ending cinematic playing (terminal)
    EndingVideo,
}

/// What the host should be drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderTarget {
    Intro,
    World,
    Cinematic,
}

/// One subtitle line on the cinematic timeline (seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleCue {
    pub start: f32,
    pub end: f32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequencer {
    pub phase: Phase,
    pub intro_timer: u32,
    /// Black overlay alpha during the intro (1 = black)
    pub fade_alpha: f32,
    /// Title text alpha
    pub text_alpha: f32,
    /// Black overlay alpha during the ending fade
    pub ending_fade_alpha: f32,
    subtitles: Vec<SubtitleCue>,
    active_cue: Option<usize>,
    /// Cinematic reached its hold point
    pub finale: bool,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Sequencer {
    pub fn new(subtitles: Vec<SubtitleCue>) -> Self {
        Self {
            phase: Phase::Intro,
            intro_timer: 0,
            fade_alpha: 1.0,
            text_alpha: 0.0,
            ending_fade_alpha: 0.0,
            subtitles,
            active_cue: None,
            finale: false,
        }
    }

    fn enter(&mut self, phase: Phase) {
        log::info!("Sequencer: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Advance the intro phases. Returns true on the tick gameplay begins.
    pub fn advance_intro(&mut self, input: &InputIntents) -> bool {
        self.intro_timer += 1;
        match self.phase {
            Phase::Intro => {
                self.fade_alpha = (self.fade_alpha - INTRO_FADE_STEP).max(0.0);
                if self.intro_timer > INTRO_TEXT_DELAY_TICKS {
                    self.text_alpha = (self.text_alpha + INTRO_TEXT_STEP).min(1.0);
                }
                if self.fade_alpha <= 0.0
                    && self.text_alpha >= 1.0
                    && self.intro_timer > INTRO_MIN_TICKS
                {
                    self.enter(Phase::WaitingForInput);
                }
                false
            }
            Phase::WaitingForInput => {
                if input.any_motion() || input.fire {
                    self.enter(Phase::FadingIn);
                }
                false
            }
            Phase::FadingIn => {
                self.fade_alpha = (self.fade_alpha + FADE_IN_STEP).min(1.0);
                if self.fade_alpha >= 1.0 {
                    self.enter(Phase::Gameplay);
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Start the ending fade. Only fires from gameplay; returns whether it did.
    pub fn begin_ending(&mut self) -> bool {
        if self.phase != Phase::Gameplay {
            return false;
        }
        self.ending_fade_alpha = 0.0;
        self.enter(Phase::EndingFading);
        true
    }

    /// Advance the ending fade. Returns true on the tick the cinematic starts.
    pub fn advance_ending_fade(&mut self) -> bool {
        if self.phase != Phase::EndingFading {
            return false;
        }
        self.ending_fade_alpha = (self.ending_fade_alpha + ENDING_FADE_STEP).min(1.0);
        if self.ending_fade_alpha >= 1.0 {
            self.enter(Phase::EndingVideo);
            return true;
        }
        false
    }

    /// Follow the external video clock: pick the subtitle, hold at the end mark
    pub fn update_cinematic(&mut self, position: Option<f32>) {
        if self.phase != Phase::EndingVideo || self.finale {
            return;
        }
        let Some(t) = position else { return };
        if t >= ENDING_HOLD_SECS {
            log::info!("Cinematic reached hold point at {:.1}s", t);
            self.finale = true;
            self.active_cue = None;
            return;
        }
        self.active_cue = self
            .subtitles
            .iter()
            .position(|cue| t >= cue.start && t <= cue.end);
    }

    /// Whether the world simulation runs this tick
    pub fn is_simulating(&self) -> bool {
        matches!(self.phase, Phase::Gameplay | Phase::EndingFading)
    }

    pub fn render_target(&self) -> RenderTarget {
        match self.phase {
            Phase::Intro | Phase::WaitingForInput | Phase::FadingIn => RenderTarget::Intro,
            Phase::Gameplay | Phase::EndingFading => RenderTarget::World,
            Phase::EndingVideo => RenderTarget::Cinematic,
        }
    }

    /// Crosshair, weapon and portrait overlays
    pub fn hud_visible(&self) -> bool {
        self.phase == Phase::Gameplay
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.active_cue
            .and_then(|i| self.subtitles.get(i))
            .map(|cue| cue.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click() -> InputIntents {
        InputIntents {
            fire: true,
            ..Default::default()
        }
    }

    /// Run the intro until waiting for input; returns ticks taken
    fn run_intro(seq: &mut Sequencer) -> u32 {
        let idle = InputIntents::default();
        let mut ticks = 0;
        while seq.phase == Phase::Intro {
            seq.advance_intro(&idle);
            ticks += 1;
            assert!(ticks < 1000, "intro never finished");
        }
        ticks
    }

    #[test]
    fn test_intro_waits_for_text_and_timer() {
        let mut seq = Sequencer::default();
        let ticks = run_intro(&mut seq);
        assert_eq!(seq.phase, Phase::WaitingForInput);
        assert!(ticks > INTRO_MIN_TICKS);
        assert_eq!(seq.fade_alpha, 0.0);
        assert_eq!(seq.text_alpha, 1.0);
        assert_eq!(seq.render_target(), RenderTarget::Intro);
        assert!(!seq.hud_visible());
    }

    #[test]
    fn test_waiting_needs_input() {
        let mut seq = Sequencer::default();
        run_intro(&mut seq);
        for _ in 0..500 {
            seq.advance_intro(&InputIntents::default());
        }
        assert_eq!(seq.phase, Phase::WaitingForInput);

        seq.advance_intro(&InputIntents {
            turn_left: true,
            ..Default::default()
        });
        assert_eq!(seq.phase, Phase::FadingIn);
    }

    #[test]
    fn test_fade_in_starts_gameplay_once() {
        let mut seq = Sequencer::default();
        run_intro(&mut seq);
        seq.advance_intro(&click());

        let mut starts = 0;
        for _ in 0..100 {
            if seq.advance_intro(&InputIntents::default()) {
                starts += 1;
            }
        }
        assert_eq!(starts, 1);
        assert_eq!(seq.phase, Phase::Gameplay);
        assert!(seq.is_simulating());
        assert!(seq.hud_visible());
    }

    #[test]
    fn test_ending_only_from_gameplay() {
        let mut seq = Sequencer::default();
        assert!(!seq.begin_ending());
        assert_eq!(seq.phase, Phase::Intro);

        seq.phase = Phase::Gameplay;
        assert!(seq.begin_ending());
        assert!(!seq.begin_ending());
        assert_eq!(seq.phase, Phase::EndingFading);
        assert!(seq.is_simulating());

        let mut ticks = 0;
        while !seq.advance_ending_fade() {
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(seq.phase, Phase::EndingVideo);
        assert_eq!(seq.render_target(), RenderTarget::Cinematic);
        assert!(!seq.is_simulating());
        assert!(!seq.advance_ending_fade());
    }

    #[test]
    fn test_cinematic_subtitles_and_hold() {
        let cues = vec![
            SubtitleCue {
                start: 4.0,
                end: 8.0,
                text: "first".into(),
            },
            SubtitleCue {
                start: 9.0,
                end: 17.0,
                text: "second".into(),
            },
        ];
        let mut seq = Sequencer::new(cues);
        seq.phase = Phase::EndingVideo;

        seq.update_cinematic(None);
        assert_eq!(seq.subtitle(), None);
        seq.update_cinematic(Some(5.0));
        assert_eq!(seq.subtitle(), Some("first"));
        seq.update_cinematic(Some(8.5));
        assert_eq!(seq.subtitle(), None);
        seq.update_cinematic(Some(10.0));
        assert_eq!(seq.subtitle(), Some("second"));

        seq.update_cinematic(Some(ENDING_HOLD_SECS));
        assert!(seq.finale);
        assert_eq!(seq.subtitle(), None);
        // Held: later positions change nothing
        seq.update_cinematic(Some(5.0));
        assert_eq!(seq.subtitle(), None);
    }
}
