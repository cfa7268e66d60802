use super::*;
use crate::error::CatalogError;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

fn t(name: &str) -> Track {
    Track {
        id: 99,
        name: name.into(),
        desc: String::new(),
        file: PathBuf::from(format!("/music/{name}.mp3")),
        image: None,
        duration: None,
    }
}

#[test]
fn new_renumbers_ids_by_position() {
    let catalog = Catalog::new(vec![t("a"), t("b"), t("c")]).unwrap();
    for (i, track) in catalog.iter().enumerate() {
        assert_eq!(track.id, i);
        assert_eq!(catalog[i].id, i);
    }
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.last_id(), 2);
    assert!(catalog.get(3).is_none());
}

#[test]
fn new_rejects_empty_track_list() {
    assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
}

#[test]
fn from_toml_file_resolves_relative_paths_against_catalog_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[[track]]
name = "Song One"
desc = "First artist"
file = "audio/song1.mp3"
image = "img/img1.jpg"
duration_secs = 183

[[track]]
name = "Song Two"
file = "/abs/song2.mp3"
"#,
    )
    .unwrap();

    let catalog = Catalog::from_toml_file(&path).unwrap();
    assert_eq!(catalog.len(), 2);

    let first = &catalog[0];
    assert_eq!(first.id, 0);
    assert_eq!(first.name, "Song One");
    assert_eq!(first.desc, "First artist");
    assert_eq!(first.file, dir.path().join("audio/song1.mp3"));
    assert_eq!(first.image, Some(dir.path().join("img/img1.jpg")));
    assert_eq!(first.duration, Some(Duration::from_secs(183)));

    let second = &catalog[1];
    assert_eq!(second.id, 1);
    assert_eq!(second.desc, "");
    assert_eq!(second.file, PathBuf::from("/abs/song2.mp3"));
    assert!(second.image.is_none());
    assert!(second.duration.is_none());
}

#[test]
fn from_toml_file_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::from_toml_file(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
}

#[test]
fn from_toml_file_reports_parse_errors_and_empty_catalogs() {
    let dir = tempfile::tempdir().unwrap();

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[[track]]\nname = 3\n").unwrap();
    assert!(matches!(
        Catalog::from_toml_file(&bad),
        Err(CatalogError::Parse { .. })
    ));

    let empty = dir.path().join("empty.toml");
    fs::write(&empty, "").unwrap();
    assert!(matches!(
        Catalog::from_toml_file(&empty),
        Err(CatalogError::Empty)
    ));
}
