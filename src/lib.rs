//! reprise: a playback state store for music player front ends.
//!
//! [`store::PlayerStore`] owns the current track, the play flag and the time
//! snapshot, and drives a [`media::MediaHandle`]. The crate also ships a rodio
//! backend, a catalog loader and the terminal player built on top of them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod runtime;
pub mod store;
mod ui;

pub use catalog::{Catalog, Track};
pub use error::{CatalogError, MediaError, SettingsError, StoreError};
pub use media::{MediaEvent, MediaHandle, ProgressFill, RodioMedia, SeekSurface};
pub use store::{Clock, PlaybackState, PlayerStore, StoreView, TimeSnapshot, ViewHandle};
