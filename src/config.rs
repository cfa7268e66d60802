//! Configuration loader and schema types.
//!
//! This module exposes the settings schema for the store, the audio backend,
//! catalog loading, the terminal UI and logging, plus helpers to load it.

mod load;
mod schema;

pub use schema::*;
