use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::{Error, Result};

/// One entry of the Vite build manifest. Fields the patcher does not use are
/// ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub file: String,
    #[serde(default)]
    pub css: Vec<String>,
}

/// The Vite build manifest: source entry points mapped to their generated,
/// content-hashed output filenames.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest(HashMap<String, ManifestEntry>);

impl Manifest {
    pub fn entry(&self, name: &str) -> Option<&ManifestEntry> {
        self.0.get(name)
    }
}

/// Load and parse the manifest at `path`.
pub fn load(path: &Path) -> Result<Manifest> {
    if !path.is_file() {
        return Err(Error::assets_manifest_missing(path.display().to_string()));
    }

    let raw = std::fs::read_to_string(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    serde_json::from_str(&raw)
        .map_err(|e| Error::assets_manifest_invalid(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MANIFEST: &str = r#"{
        "src/main.jsx": {
            "file": "assets/main-abc123.js",
            "name": "main",
            "src": "src/main.jsx",
            "isEntry": true,
            "css": ["assets/main-abc123.css"]
        }
    }"#;

    #[test]
    fn parses_entry_with_extra_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, MANIFEST).unwrap();

        let manifest = load(&path).unwrap();
        let entry = manifest.entry("src/main.jsx").unwrap();
        assert_eq!(entry.file, "assets/main-abc123.js");
        assert_eq!(entry.css, vec!["assets/main-abc123.css"]);
    }

    #[test]
    fn css_defaults_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, r#"{"src/main.jsx": {"file": "assets/main-abc123.js"}}"#).unwrap();

        let manifest = load(&path).unwrap();
        assert!(manifest.entry("src/main.jsx").unwrap().css.is_empty());
    }

    #[test]
    fn missing_file_maps_to_manifest_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("manifest.json")).unwrap_err();
        assert_eq!(err.code, crate::core::ErrorCode::AssetsManifestMissing);
    }

    #[test]
    fn garbage_maps_to_manifest_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, "not json").unwrap();

        let err = load(&path).unwrap_err();
        assert_eq!(err.code, crate::core::ErrorCode::AssetsManifestInvalid);
    }
}
