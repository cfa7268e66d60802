use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::catalog::{Catalog, scan};
use crate::config::CatalogSettings;
use crate::error::CatalogError;

/// Resolve the catalog source: the CLI argument, then `catalog.file`, then
/// the current directory. Directories are scanned; anything else is read as
/// a TOML catalog file.
pub fn load_catalog(arg: Option<String>, settings: &CatalogSettings) -> Result<Catalog, CatalogError> {
    let source = match arg {
        Some(a) => PathBuf::from(a),
        None => settings
            .file
            .clone()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    debug!(source = %source.display(), "loading catalog");

    if source.is_dir() {
        Catalog::new(scan(&source, settings))
    } else {
        Catalog::from_toml_file(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_catalog_scans_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("two.ogg"), b"not real").unwrap();

        let catalog = load_catalog(
            Some(dir.path().to_string_lossy().into_owned()),
            &CatalogSettings::default(),
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "one");
    }

    #[test]
    fn load_catalog_falls_back_to_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(&path, "[[track]]\nname = \"Only\"\nfile = \"only.mp3\"\n").unwrap();

        let settings = CatalogSettings {
            file: Some(path),
            ..CatalogSettings::default()
        };
        let catalog = load_catalog(None, &settings).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].file, dir.path().join("only.mp3"));
    }

    #[test]
    fn load_catalog_rejects_empty_directories() {
        let dir = tempfile::tempdir().unwrap();
        let res = load_catalog(
            Some(dir.path().to_string_lossy().into_owned()),
            &CatalogSettings::default(),
        );
        assert!(matches!(res, Err(CatalogError::Empty)));
    }
}
