use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::CatalogError;

use super::model::{Catalog, Track};

/// On-disk catalog format:
///
/// ```toml
/// [[track]]
/// name = "Song"
/// desc = "Artist"
/// file = "audio/song.mp3"
/// image = "covers/song.jpg"
/// duration_secs = 183
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "track")]
    tracks: Vec<TrackEntry>,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    name: String,
    #[serde(default)]
    desc: String,
    file: PathBuf,
    image: Option<PathBuf>,
    duration_secs: Option<u64>,
}

impl Catalog {
    /// Load a catalog from a TOML file. Relative `file`/`image` paths are
    /// resolved against the catalog's own directory.
    pub fn from_toml_file(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml_str(&text, base).map_err(|e| match e {
            ParseFailure::Toml(source) => CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Catalog(e) => e,
        })
    }

    fn from_toml_str(text: &str, base: &Path) -> Result<Self, ParseFailure> {
        let parsed: CatalogFile = toml::from_str(text).map_err(ParseFailure::Toml)?;

        let tracks = parsed
            .tracks
            .into_iter()
            .map(|e| Track {
                id: 0,
                name: e.name,
                desc: e.desc,
                file: resolve(base, e.file),
                image: e.image.map(|p| resolve(base, p)),
                duration: e.duration_secs.map(Duration::from_secs),
            })
            .collect();

        Catalog::new(tracks).map_err(ParseFailure::Catalog)
    }
}

enum ParseFailure {
    Toml(toml::de::Error),
    Catalog(CatalogError),
}

fn resolve(base: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() { p } else { base.join(p) }
}
