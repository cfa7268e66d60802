//! Media backends: the contract the store drives and a rodio implementation.

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioMedia;
pub use types::*;

#[cfg(test)]
mod tests;
