use std::path::Path;
use std::time::Duration;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::CatalogSettings;

use super::model::Track;

fn is_audio_file(path: &Path, settings: &CatalogSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Build the description line from whichever of artist/album is present.
fn make_desc(artist: Option<&str>, album: Option<&str>) -> String {
    [artist, album]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Walk `dir` for audio files and turn each into a `Track`, sorted by name.
///
/// Ids are placeholders until the tracks are handed to `Catalog::new`.
pub fn scan(dir: &Path, settings: &CatalogSettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !(path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings))
        {
            continue;
        }

        let mut name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mut artist: Option<String> = None;
        let mut album: Option<String> = None;
        let mut duration: Option<Duration> = None;

        match lofty::read_from_path(path) {
            Ok(tagged) => {
                duration = Some(tagged.properties().duration());

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.title() {
                        if !v.trim().is_empty() {
                            name = v.trim().to_string();
                        }
                    }
                    artist = tag.artist().map(|v| v.into_owned());
                    album = tag.album().map(|v| v.into_owned());
                }
            }
            Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
        }

        tracks.push(Track {
            id: 0,
            name,
            desc: make_desc(artist.as_deref(), album.as_deref()),
            file: path.to_path_buf(),
            image: None,
            duration,
        });
    }

    tracks.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    debug!(dir = %dir.display(), count = tracks.len(), "catalog scan finished");
    tracks
}
