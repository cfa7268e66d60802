//! Track catalog: the static, ordered list of tracks the store plays from.
//!
//! A catalog comes either from a TOML catalog file (`Catalog::from_toml_file`)
//! or from scanning a directory of audio files (`scan` + `Catalog::new`).

mod load;
mod model;
mod scan;

pub use model::*;
pub use scan::scan;

#[cfg(test)]
mod tests;
