//! Media contract shared by the store and its backends.
//!
//! `MediaHandle` is the playback surface the store drives. `SeekSurface` and
//! `ProgressFill` are the two progress-bar handles: one supplies geometry for
//! seeking, the other receives the fill width.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::catalog::Track;
use crate::error::MediaError;

/// Notifications a media handle sends to its listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// The playback position moved (periodic while playing, and after a seek).
    TimeUpdate,
    /// The current source played to its end.
    Ended,
}

/// A host object that decodes and plays one source at a time.
///
/// Times are in seconds. `duration` is `NaN` while the length is unknown.
pub trait MediaHandle {
    /// Replace the current source. Position resets to zero and playback stops.
    fn load(&mut self, track: &Track) -> Result<(), MediaError>;
    /// Start or resume playback. Fire-and-forget: returns once the request is queued.
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    fn duration(&self) -> f64;
    /// Install the time-update listener, replacing any previous one.
    fn set_time_update_listener(&mut self, listener: Sender<MediaEvent>);
}

/// Geometry of the progress-bar background used to map a pointer offset to a time.
pub trait SeekSurface {
    fn offset_width(&self) -> f64;
}

/// The filled portion of the progress bar.
pub trait ProgressFill {
    fn set_width_percent(&mut self, percent: f64);
}

#[derive(Debug, Clone, Default)]
/// Position information the audio thread shares with `RodioMedia`.
pub struct PlaybackInfo {
    /// Position within the current source.
    pub position: Duration,
    /// Length of the current source, when known.
    pub duration: Option<Duration>,
    /// Whether the sink is currently playing.
    pub playing: bool,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
