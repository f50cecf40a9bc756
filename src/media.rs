//! Sound and video requests
//!
//! The simulation only *asks* for media. Requests are queued on the game state
//! during a tick and handed to a [`MediaSink`] afterwards. Playback failures are
//! logged and dropped; the tick loop never waits on media.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Weapon fired
    Phaser,
    /// Enemy hit by a projectile (variant index)
    EnemyStruck(u8),
    /// Exit passage opened
    DoorOpen,
    /// Player stepped into the exit
    DoorClose,
    /// Periodic enemy taunt (variant index)
    Taunt(u8),
}

/// Number of `EnemyStruck` variants
pub const STRUCK_VARIANTS: u8 = 2;
/// Number of `Taunt` variants
pub const TAUNT_VARIANTS: u8 = 4;

impl SoundEffect {
    /// Symbolic asset identifier resolved by the host
    pub fn asset_id(&self) -> &'static str {
        match self {
            SoundEffect::Phaser => "sfx/phaser",
            SoundEffect::EnemyStruck(0) => "sfx/struck_1",
            SoundEffect::EnemyStruck(_) => "sfx/struck_2",
            SoundEffect::DoorOpen => "sfx/door_open",
            SoundEffect::DoorClose => "sfx/door_close",
            SoundEffect::Taunt(0) => "voice/taunt_1",
            SoundEffect::Taunt(1) => "voice/taunt_2",
            SoundEffect::Taunt(2) => "voice/taunt_3",
            SoundEffect::Taunt(_) => "voice/taunt_4",
        }
    }
}

/// Video clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoClip {
    /// Ending cinematic
    Ending,
}

impl VideoClip {
    pub fn asset_id(&self) -> &'static str {
        match self {
            VideoClip::Ending => "video/ending",
        }
    }
}

/// A fire-and-forget media request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaRequest {
    Sound(SoundEffect),
    Video(VideoClip),
}

/// Error reported by a media backend
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    /// Backend not available (no device, not yet unlocked by a user gesture)
    Unavailable(String),
    /// Backend refused the asset
    Rejected(String),
}

impl std::fmt::Display for MediaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaError::Unavailable(msg) => write!(f, "media unavailable: {}", msg),
            MediaError::Rejected(msg) => write!(f, "media rejected: {}", msg),
        }
    }
}

impl std::error::Error for MediaError {}

/// External media player
pub trait MediaSink {
    fn play_sound(&mut self, effect: SoundEffect) -> Result<(), MediaError>;
    fn play_video(&mut self, clip: VideoClip) -> Result<(), MediaError>;
    /// Current playback position in seconds, `None` if the clip is not playing
    fn video_position(&self, clip: VideoClip) -> Option<f32>;
}

/// Hand all pending requests to the sink. Failures are logged and ignored.
pub fn dispatch(requests: &mut Vec<MediaRequest>, sink: &mut dyn MediaSink) {
    for request in requests.drain(..) {
        let result = match request {
            MediaRequest::Sound(effect) => sink.play_sound(effect),
            MediaRequest::Video(clip) => sink.play_video(clip),
        };
        if let Err(e) = result {
            log::warn!("Media request {:?} failed: {}", request, e);
        }
    }
}

/// Headless sink: logs requests and runs a video clock off simulated time
#[derive(Debug, Default)]
pub struct LogMedia {
    video: Option<(VideoClip, f32)>,
}

impl LogMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the fake playback clock
    pub fn advance(&mut self, dt: f32) {
        if let Some((_, pos)) = &mut self.video {
            *pos += dt;
        }
    }
}

impl MediaSink for LogMedia {
    fn play_sound(&mut self, effect: SoundEffect) -> Result<(), MediaError> {
        log::debug!("play sound {}", effect.asset_id());
        Ok(())
    }

    fn play_video(&mut self, clip: VideoClip) -> Result<(), MediaError> {
        log::info!("play video {}", clip.asset_id());
        self.video = Some((clip, 0.0));
        Ok(())
    }

    fn video_position(&self, clip: VideoClip) -> Option<f32> {
        self.video.filter(|(c, _)| *c == clip).map(|(_, pos)| pos)
    }
}

/// Records requests for a host to drain; the host reports video position back
#[derive(Debug, Default)]
pub struct QueuedMedia {
    pub played: Vec<MediaRequest>,
    video_position: Option<f32>,
    /// Reject everything (exercise the failure path)
    pub unavailable: bool,
}

impl QueuedMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_video_position(&mut self, secs: Option<f32>) {
        self.video_position = secs;
    }

    pub fn drain(&mut self) -> Vec<MediaRequest> {
        std::mem::take(&mut self.played)
    }
}

impl MediaSink for QueuedMedia {
    fn play_sound(&mut self, effect: SoundEffect) -> Result<(), MediaError> {
        if self.unavailable {
            return Err(MediaError::Unavailable("audio locked".into()));
        }
        self.played.push(MediaRequest::Sound(effect));
        Ok(())
    }

    fn play_video(&mut self, clip: VideoClip) -> Result<(), MediaError> {
        if self.unavailable {
            return Err(MediaError::Unavailable("video locked".into()));
        }
        self.played.push(MediaRequest::Video(clip));
        Ok(())
    }

    fn video_position(&self, _clip: VideoClip) -> Option<f32> {
        self.video_position
    }
}
