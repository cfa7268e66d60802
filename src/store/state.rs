//! Plain state types owned by the store and published to consumers.

use std::fmt;

use crate::catalog::Track;

/// Current selection and the play flag.
///
/// `is_playing` records the last action issued (play or pause), not what
/// the output device is doing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_track: Track,
    pub is_playing: bool,
}

/// A floored minute/second pair.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Clock {
    pub minute: u64,
    pub second: u64,
}

impl Clock {
    /// Split `seconds` into whole minutes and the remaining whole seconds.
    /// Negative or non-finite input yields `0:00`.
    pub fn from_seconds(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds < 0.0 {
            return Self::default();
        }
        Self {
            minute: (seconds / 60.0).floor() as u64,
            second: (seconds % 60.0).floor() as u64,
        }
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minute, self.second)
    }
}

/// Elapsed and total time of the current track.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TimeSnapshot {
    pub current_time: Clock,
    pub total_time: Clock,
}

impl TimeSnapshot {
    pub fn from_seconds(current: f64, total: f64) -> Self {
        Self {
            current_time: Clock::from_seconds(current),
            total_time: Clock::from_seconds(total),
        }
    }
}

impl fmt::Display for TimeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.current_time, self.total_time)
    }
}

/// Width of the progress fill: whole elapsed seconds over whole total seconds,
/// as a percentage in `0..=100`. Zero while the total is unknown.
pub fn progress_percent(current: f64, total: f64) -> f64 {
    let total = total.floor();
    if !current.is_finite() || !total.is_finite() || total <= 0.0 {
        return 0.0;
    }
    (current.floor().max(0.0) / total * 100.0).min(100.0)
}

/// Position for a pointer `offset_x` on a bar `width` wide over a track
/// `duration` seconds long. `None` when either extent is zero or unknown.
pub fn seek_target(offset_x: f64, width: f64, duration: f64) -> Option<f64> {
    if !(width.is_finite() && width > 0.0 && duration.is_finite() && duration > 0.0)
        || !offset_x.is_finite()
    {
        return None;
    }
    Some((offset_x / width * duration).clamp(0.0, duration))
}

/// Snapshot of the store published behind `ViewHandle` for readers that do
/// not hold a reference to the store itself.
#[derive(Debug, Clone)]
pub struct StoreView {
    pub track: Track,
    pub is_playing: bool,
    pub time: TimeSnapshot,
    pub progress_percent: f64,
    /// Bumped on every publish.
    pub revision: u64,
}
