//! Utilities for creating `rodio` sinks from audio files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::MediaError;

/// Create a paused `Sink` for `file` that starts playback at `start_at`.
///
/// Also returns the decoder's total duration when the format reports one.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    file: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), MediaError> {
    let reader = File::open(file).map_err(|source| MediaError::Open {
        path: file.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(reader)).map_err(|e| MediaError::Decode {
        path: file.to_path_buf(),
        reason: e.to_string(),
    })?;
    let total = decoder.total_duration();

    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}
