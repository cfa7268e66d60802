use std::ops::Index;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CatalogError;

/// One playable entry in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Position of this track in its catalog.
    pub id: usize,
    pub name: String,
    /// Artist or free-form description.
    pub desc: String,
    /// Audio source.
    pub file: PathBuf,
    pub image: Option<PathBuf>,
    /// Known length, when tags or the catalog file provide one.
    pub duration: Option<Duration>,
}

/// Static ordered list of tracks. Never empty; `catalog[id].id == id`.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog, renumbering every track by its position.
    pub fn new(mut tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, t) in tracks.iter_mut().enumerate() {
            t.id = i;
        }
        Ok(Self { tracks })
    }

    pub fn get(&self, id: usize) -> Option<&Track> {
        self.tracks.get(id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the last track.
    pub fn last_id(&self) -> usize {
        self.tracks.len() - 1
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }
}

impl Index<usize> for Catalog {
    type Output = Track;

    fn index(&self, id: usize) -> &Track {
        &self.tracks[id]
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
