//! Playback state store.
//!
//! `PlayerStore` holds the current track, the play flag and the derived time
//! snapshot, and exposes the playback actions (`play`, `pause`, `play_by_id`,
//! `previous`, `next`, `seek`) that drive a `MediaHandle`.

mod model;
mod state;

pub use model::*;
pub use state::*;
