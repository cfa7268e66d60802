use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::error::MediaError;

use super::sink::create_sink_at;
use super::types::{MediaEvent, PlaybackHandle};

/// Where the audio thread reports whether a command took effect.
pub(super) type Reply = SyncSender<Result<(), MediaError>>;

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the source; `duration` is the catalog's known length, if any.
    Load {
        file: PathBuf,
        duration: Option<Duration>,
        reply: Reply,
    },
    Play(Reply),
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    /// Install the time-update listener.
    Listen(Sender<MediaEvent>),
    Quit,
}

/// Position of a source that was at `accumulated` when it last (re)started at
/// `started_at`, evaluated at `now` and capped at `duration` when known.
pub(super) fn position_at(
    accumulated: Duration,
    started_at: Option<Instant>,
    now: Instant,
    duration: Option<Duration>,
) -> Duration {
    let pos = accumulated + started_at.map_or(Duration::ZERO, |st| now.saturating_duration_since(st));
    match duration {
        Some(d) => pos.min(d),
        None => pos,
    }
}

/// Everything the audio thread knows about the current source.
struct Deck {
    stream: OutputStream,
    sink: Option<Sink>,
    file: Option<PathBuf>,
    duration: Option<Duration>,
    paused: bool,
    ended: bool,
    // Position bookkeeping: `accumulated` up to the last start, plus time since `started_at`.
    started_at: Option<Instant>,
    accumulated: Duration,
    listener: Option<Sender<MediaEvent>>,
    info: PlaybackHandle,
}

impl Deck {
    fn position(&self) -> Duration {
        position_at(self.accumulated, self.started_at, Instant::now(), self.duration)
    }

    fn notify(&mut self, event: MediaEvent) {
        if let Some(tx) = &self.listener {
            if tx.send(event).is_err() {
                // The store went away; stop notifying.
                self.listener = None;
            }
        }
    }

    fn publish(&self) {
        if let Ok(mut info) = self.info.lock() {
            info.position = self.position();
            info.duration = self.duration;
            info.playing = !self.paused;
        }
    }

    fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    /// Rebuild the sink for the current file at `start_at`, leaving it paused.
    fn rebuild(&mut self, start_at: Duration) -> Result<(), MediaError> {
        let file = self.file.clone().ok_or(MediaError::NoSource)?;
        self.stop_sink();
        let (sink, total) = create_sink_at(&self.stream, &file, start_at).inspect_err(|e| {
            error!(error = %e, "failed to prepare audio source");
        })?;
        if self.duration.is_none() {
            self.duration = total;
        }
        self.sink = Some(sink);
        Ok(())
    }

    /// Switch to `file`, stopped at 0. The old source stops even if the new
    /// one cannot be opened.
    fn load(&mut self, file: PathBuf, duration: Option<Duration>) -> Result<(), MediaError> {
        debug!(file = %file.display(), "loading source");
        self.stop_sink();
        self.file = Some(file);
        self.duration = duration;
        self.paused = true;
        self.ended = false;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        let built = self.rebuild(Duration::ZERO);
        self.publish();
        self.notify(MediaEvent::TimeUpdate);
        built
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if !self.paused {
            return Ok(());
        }
        if self.ended {
            // Playing an ended source starts it over.
            self.accumulated = Duration::ZERO;
            self.ended = false;
            self.sink = None;
        }
        if self.sink.is_none() {
            self.rebuild(self.accumulated)?;
        }
        if let Some(s) = &self.sink {
            s.play();
        }
        self.paused = false;
        self.started_at = Some(Instant::now());
        self.publish();
        Ok(())
    }

    fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.accumulated = self.position();
        self.started_at = None;
        if let Some(s) = &self.sink {
            s.pause();
        }
        self.paused = true;
        self.publish();
    }

    fn seek(&mut self, to: Duration) {
        let to = match self.duration {
            Some(d) => to.min(d),
            None => to,
        };
        if self.file.is_none() {
            return;
        }
        // Scrubbing: rebuild the current sink and skip into the file.
        if self.rebuild(to).is_err() {
            return;
        }
        self.ended = false;
        self.accumulated = to;
        if self.paused {
            self.started_at = None;
        } else {
            if let Some(s) = &self.sink {
                s.play();
            }
            self.started_at = Some(Instant::now());
        }
        self.publish();
        self.notify(MediaEvent::TimeUpdate);
    }

    /// Periodic work: advance the position, detect the end of the source.
    fn tick(&mut self) {
        if self.paused {
            return;
        }
        let drained = self.sink.as_ref().is_none_or(Sink::empty);
        if drained {
            self.accumulated = self.duration.unwrap_or_else(|| self.position());
            self.started_at = None;
            self.paused = true;
            self.ended = true;
            self.publish();
            self.notify(MediaEvent::TimeUpdate);
            self.notify(MediaEvent::Ended);
            return;
        }
        self.publish();
        self.notify(MediaEvent::TimeUpdate);
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    info: PlaybackHandle,
    tick: Duration,
    ready: SyncSender<Result<(), MediaError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(MediaError::Output(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut deck = Deck {
            stream,
            sink: None,
            file: None,
            duration: None,
            paused: true,
            ended: false,
            started_at: None,
            accumulated: Duration::ZERO,
            listener: None,
            info,
        };

        let mut next_tick = Instant::now() + tick;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            match rx.recv_timeout(timeout) {
                Ok(AudioCmd::Load {
                    file,
                    duration,
                    reply,
                }) => {
                    let _ = reply.send(deck.load(file, duration));
                }
                Ok(AudioCmd::Play(reply)) => {
                    let _ = reply.send(deck.play());
                }
                Ok(AudioCmd::Pause) => deck.pause(),
                Ok(AudioCmd::Seek(to)) => deck.seek(to),
                Ok(AudioCmd::Listen(tx)) => deck.listener = Some(tx),
                Ok(AudioCmd::Quit) => {
                    deck.stop_sink();
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    deck.tick();
                    next_tick = Instant::now() + tick;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("media handle dropped without quit");
                    deck.stop_sink();
                    break;
                }
            }
        }
        debug!("audio thread finished");
    })
}
