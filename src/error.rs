//! Error types shared by the store, the media backend and the catalog loader.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by `PlayerStore` actions.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An action needed the media handle before one was attached.
    #[error("no media handle attached")]
    NoMedia,

    #[error("track {id} is out of range (catalog has {len} tracks)")]
    TrackOutOfRange { id: usize, len: usize },

    /// Seeking needs a non-zero bar width and a known, positive duration.
    #[error("seek unavailable: progress bar width or track duration is unknown")]
    SeekUnavailable,

    #[error(transparent)]
    Media(#[from] MediaError),
}

/// Errors raised by a media backend.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// Play was requested before any source was loaded.
    #[error("no source loaded")]
    NoSource,

    /// The backend thread is gone.
    #[error("media backend disconnected")]
    Disconnected,
}

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog contains no tracks")]
    Empty,

    #[error("failed to read catalog {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Load(#[from] ::config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid {
        key: &'static str,
        reason: &'static str,
    },
}
