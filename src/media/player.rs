use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::catalog::Track;
use crate::config::AudioSettings;
use crate::error::MediaError;

use super::thread::{AudioCmd, Reply, spawn_audio_thread};
use super::types::{MediaEvent, MediaHandle, PlaybackHandle, PlaybackInfo};

/// `MediaHandle` backed by a rodio output stream on a dedicated audio thread.
///
/// Commands are queued to the thread; position and duration are read from
/// the `PlaybackInfo` the thread publishes.
pub struct RodioMedia {
    tx: Sender<AudioCmd>,
    info: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioMedia {
    /// Open the default audio output and start the audio thread.
    pub fn spawn(settings: &AudioSettings) -> Result<Self, MediaError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
        let tick = Duration::from_millis(settings.time_update_interval_ms.max(1));

        let join = spawn_audio_thread(rx, info.clone(), tick, ready_tx);
        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                tx,
                info,
                join: Mutex::new(Some(join)),
            }),
            Ok(Err(e)) => {
                let _ = join.join();
                Err(e)
            }
            Err(_) => Err(MediaError::Disconnected),
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), MediaError> {
        self.tx.send(cmd).map_err(|_| MediaError::Disconnected)
    }

    /// Send a command and wait for the audio thread's verdict on it.
    fn request(
        &self,
        cmd: impl FnOnce(Reply) -> AudioCmd,
    ) -> Result<(), MediaError> {
        let (reply, verdict) = mpsc::sync_channel(1);
        self.send(cmd(reply))?;
        verdict.recv().map_err(|_| MediaError::Disconnected)?
    }

    /// Stop playback and wait for the audio thread to exit.
    pub fn quit(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
        debug!("rodio media shut down");
    }
}

impl Drop for RodioMedia {
    fn drop(&mut self) {
        let _ = self.send(AudioCmd::Quit);
    }
}

impl MediaHandle for RodioMedia {
    fn load(&mut self, track: &Track) -> Result<(), MediaError> {
        // Reflect the new source immediately, before the thread catches up.
        if let Ok(mut info) = self.info.lock() {
            info.position = Duration::ZERO;
            info.duration = track.duration;
            info.playing = false;
        }
        self.request(|reply| AudioCmd::Load {
            file: track.file.clone(),
            duration: track.duration,
            reply,
        })
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.request(AudioCmd::Play)
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn current_time(&self) -> f64 {
        self.info
            .lock()
            .map(|info| info.position.as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_current_time(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let to = Duration::from_secs_f64(seconds.max(0.0));
        if let Ok(mut info) = self.info.lock() {
            info.position = to;
        }
        let _ = self.send(AudioCmd::Seek(to));
    }

    fn duration(&self) -> f64 {
        self.info
            .lock()
            .ok()
            .and_then(|info| info.duration)
            .map_or(f64::NAN, |d| d.as_secs_f64())
    }

    fn set_time_update_listener(&mut self, listener: Sender<MediaEvent>) {
        let _ = self.send(AudioCmd::Listen(listener));
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::thread;

    use super::*;

    fn track(file: &str) -> Track {
        Track {
            id: 0,
            name: "t".into(),
            desc: String::new(),
            file: PathBuf::from(file),
            image: None,
            duration: Some(Duration::from_secs(200)),
        }
    }

    /// A `RodioMedia` whose audio thread is a stand-in answering every
    /// command with `verdict`.
    fn media_answering(verdict: fn(&AudioCmd) -> Result<(), MediaError>) -> RodioMedia {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let join = thread::spawn(move || {
            while let Ok(cmd) = rx.recv() {
                let result = verdict(&cmd);
                match cmd {
                    AudioCmd::Load { reply, .. } | AudioCmd::Play(reply) => {
                        let _ = reply.send(result);
                    }
                    AudioCmd::Quit => break,
                    _ => {}
                }
            }
        });
        RodioMedia {
            tx,
            info: Arc::new(Mutex::new(PlaybackInfo::default())),
            join: Mutex::new(Some(join)),
        }
    }

    #[test]
    fn load_reports_decode_failure_from_audio_thread() {
        let mut media = media_answering(|cmd| match cmd {
            AudioCmd::Load { file, .. } => Err(MediaError::Decode {
                path: file.clone(),
                reason: "unsupported format".into(),
            }),
            _ => Ok(()),
        });

        let err = media.load(&track("/music/broken.mp3")).unwrap_err();
        assert!(matches!(
            err,
            MediaError::Decode { ref path, .. } if path == &PathBuf::from("/music/broken.mp3")
        ));
        // The new source's extents are visible right away.
        assert_eq!(media.current_time(), 0.0);
        assert_eq!(media.duration(), 200.0);
        media.quit();
    }

    #[test]
    fn play_reports_missing_source() {
        let mut media = media_answering(|cmd| match cmd {
            AudioCmd::Play(_) => Err(MediaError::NoSource),
            _ => Ok(()),
        });

        assert!(media.load(&track("/music/ok.mp3")).is_ok());
        assert!(matches!(media.play(), Err(MediaError::NoSource)));
        media.quit();
    }

    #[test]
    fn commands_after_quit_report_disconnected() {
        let mut media = media_answering(|_| Ok(()));
        media.quit();
        assert!(matches!(media.play(), Err(MediaError::Disconnected)));
    }
}
