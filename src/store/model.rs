use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Track};
use crate::config::StoreSettings;
use crate::error::StoreError;
use crate::media::{MediaEvent, MediaHandle, ProgressFill, SeekSurface};

use super::state::{PlaybackState, StoreView, TimeSnapshot, progress_percent, seek_target};

pub type ViewHandle = Arc<Mutex<StoreView>>;

enum Subscription {
    Unmounted,
    /// Mounted; the listener goes in once `subscribe_delay` has passed.
    Pending { mounted_at: Instant },
    Installed { events: Receiver<MediaEvent> },
}

/// Playback state container for a music player front end.
///
/// Owns the current track, the play flag and the time snapshot, and drives a
/// `MediaHandle`. Consumers read through `&PlayerStore` (or the shared
/// `ViewHandle`) and act through `&mut PlayerStore`.
pub struct PlayerStore<M: MediaHandle> {
    catalog: Catalog,
    playback: PlaybackState,
    time: TimeSnapshot,
    progress_percent: f64,

    media: Option<M>,
    seek_surface: Option<Box<dyn SeekSurface>>,
    progress_fill: Option<Box<dyn ProgressFill>>,

    subscription: Subscription,
    subscribe_delay: Duration,

    view: ViewHandle,
}

impl<M: MediaHandle> PlayerStore<M> {
    /// Create a store positioned on `catalog[settings.initial_track]`, paused.
    pub fn new(catalog: Catalog, settings: &StoreSettings) -> Result<Self, StoreError> {
        let current_track = catalog.get(settings.initial_track).cloned().ok_or(
            StoreError::TrackOutOfRange {
                id: settings.initial_track,
                len: catalog.len(),
            },
        )?;

        let view = Arc::new(Mutex::new(StoreView {
            track: current_track.clone(),
            is_playing: false,
            time: TimeSnapshot::default(),
            progress_percent: 0.0,
            revision: 0,
        }));

        Ok(Self {
            catalog,
            playback: PlaybackState {
                current_track,
                is_playing: false,
            },
            time: TimeSnapshot::default(),
            progress_percent: 0.0,
            media: None,
            seek_surface: None,
            progress_fill: None,
            subscription: Subscription::Unmounted,
            subscribe_delay: Duration::from_millis(settings.subscribe_delay_ms),
            view,
        })
    }

    /// Attach the media handle and load the current track into it.
    ///
    /// Replacing a handle after the subscription is installed moves the
    /// subscription to the new handle.
    pub fn attach_media(&mut self, mut media: M) -> Result<(), StoreError> {
        media.load(&self.playback.current_track)?;
        if matches!(self.subscription, Subscription::Installed { .. }) {
            let (tx, rx) = mpsc::channel();
            media.set_time_update_listener(tx);
            self.subscription = Subscription::Installed { events: rx };
        }
        self.media = Some(media);
        Ok(())
    }

    /// Take the media handle back, e.g. to shut its backend down.
    pub fn detach_media(&mut self) -> Option<M> {
        self.media.take()
    }

    /// Attach the progress-bar background (seek geometry) and fill.
    pub fn attach_progress(
        &mut self,
        surface: impl SeekSurface + 'static,
        fill: impl ProgressFill + 'static,
    ) {
        self.seek_surface = Some(Box::new(surface));
        self.progress_fill = Some(Box::new(fill));
    }

    pub fn mount(&mut self) {
        self.mount_at(Instant::now());
    }

    /// Start the subscription delay. Only the first mount counts.
    pub fn mount_at(&mut self, now: Instant) {
        if matches!(self.subscription, Subscription::Unmounted) {
            self.subscription = Subscription::Pending { mounted_at: now };
        }
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.subscription, Subscription::Installed { .. })
    }

    pub fn poll(&mut self) -> usize {
        self.poll_at(Instant::now())
    }

    /// Install the time-update subscription when due, then handle every
    /// queued notification. Returns the number of time updates handled.
    pub fn poll_at(&mut self, now: Instant) -> usize {
        if let Subscription::Pending { mounted_at } = self.subscription {
            if now.saturating_duration_since(mounted_at) >= self.subscribe_delay {
                if let Some(media) = self.media.as_mut() {
                    let (tx, rx) = mpsc::channel();
                    media.set_time_update_listener(tx);
                    self.subscription = Subscription::Installed { events: rx };
                    debug!("time-update subscription installed");
                }
            }
        }

        let Subscription::Installed { events } = &self.subscription else {
            return 0;
        };
        let pending: Vec<MediaEvent> = events.try_iter().collect();

        let mut handled = 0;
        for event in pending {
            match event {
                MediaEvent::TimeUpdate => {
                    self.handle_time_update();
                    handled += 1;
                }
                MediaEvent::Ended => {
                    // The play flag only follows app actions.
                    debug!(id = self.playback.current_track.id, "source ended");
                }
            }
        }
        handled
    }

    /// Refresh the progress fill and time snapshot from the media handle.
    pub fn handle_time_update(&mut self) {
        if self.media.is_none() {
            return;
        }
        self.refresh_time();
        self.publish();
    }

    /// Start or resume the current track.
    pub fn play(&mut self) -> Result<(), StoreError> {
        let media = self.media.as_mut().ok_or(StoreError::NoMedia)?;
        media.play()?;
        self.set_playing(true);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), StoreError> {
        let media = self.media.as_mut().ok_or(StoreError::NoMedia)?;
        media.pause();
        self.set_playing(false);
        Ok(())
    }

    /// `pause` when playing, `play` otherwise.
    pub fn toggle(&mut self) -> Result<(), StoreError> {
        if self.playback.is_playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Switch to `catalog[id]` and play it.
    pub fn play_by_id(&mut self, id: usize) -> Result<(), StoreError> {
        let track = self
            .catalog
            .get(id)
            .cloned()
            .ok_or(StoreError::TrackOutOfRange {
                id,
                len: self.catalog.len(),
            })?;
        self.switch_and_play(track)
    }

    /// Play the previous track. No-op on the first one.
    pub fn previous(&mut self) -> Result<(), StoreError> {
        let id = self.playback.current_track.id;
        if id == 0 {
            return Ok(());
        }
        self.play_by_id(id - 1)
    }

    /// Play the next track. No-op on the last one.
    pub fn next(&mut self) -> Result<(), StoreError> {
        let id = self.playback.current_track.id;
        if id >= self.catalog.last_id() {
            return Ok(());
        }
        self.play_by_id(id + 1)
    }

    /// Seek to the position under a pointer `offset_x` cells/pixels into the
    /// progress-bar background.
    pub fn seek(&mut self, offset_x: f64) -> Result<(), StoreError> {
        let width = self
            .seek_surface
            .as_ref()
            .map_or(0.0, |s| s.offset_width());
        let media = self.media.as_mut().ok_or(StoreError::NoMedia)?;

        let target =
            seek_target(offset_x, width, media.duration()).ok_or(StoreError::SeekUnavailable)?;
        debug!(offset_x, width, target, "seek");
        media.set_current_time(target);
        Ok(())
    }

    pub fn state(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn current_track(&self) -> &Track {
        &self.playback.current_track
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing
    }

    pub fn time(&self) -> TimeSnapshot {
        self.time
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.media.as_mut()
    }

    /// Shared read handle to the published state.
    pub fn view_handle(&self) -> ViewHandle {
        self.view.clone()
    }

    fn switch_and_play(&mut self, track: Track) -> Result<(), StoreError> {
        info!(id = track.id, name = %track.name, "switching track");
        let Some(media) = self.media.as_mut() else {
            // attach_media loads whatever is selected by then.
            self.playback.current_track = track;
            self.refresh_time();
            self.publish();
            return Err(StoreError::NoMedia);
        };

        if let Err(e) = media.load(&track) {
            warn!(id = track.id, error = %e, "track failed to load");
            // A load stops the previous source even when it fails.
            self.set_playing(false);
            return Err(e.into());
        }
        let played = media.play();

        self.playback.current_track = track;
        self.playback.is_playing = played.is_ok();
        self.refresh_time();
        self.publish();
        played.map_err(StoreError::from)
    }

    /// Recompute the time snapshot and fill from the media position.
    fn refresh_time(&mut self) {
        let (current, total) = self
            .media
            .as_ref()
            .map_or((0.0, f64::NAN), |m| (m.current_time(), m.duration()));

        self.progress_percent = progress_percent(current, total);
        if let Some(fill) = self.progress_fill.as_mut() {
            fill.set_width_percent(self.progress_percent);
        }
        self.time = TimeSnapshot::from_seconds(current, total);
    }

    fn set_playing(&mut self, playing: bool) {
        if self.playback.is_playing != playing {
            self.playback.is_playing = playing;
            self.publish();
        }
    }

    fn publish(&self) {
        if let Ok(mut view) = self.view.lock() {
            view.track = self.playback.current_track.clone();
            view.is_playing = self.playback.is_playing;
            view.time = self.time;
            view.progress_percent = self.progress_percent;
            view.revision += 1;
        }
    }
}
