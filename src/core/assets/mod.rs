//! Frontend asset synchronization.
//!
//! Vite writes content-hashed bundle names into its build manifest; the
//! backend template references those names through Django's static tag.
//! `sync()` resolves the current names from the manifest and patches the
//! template so the two stay in step after every build.
//!
//! Every failure check runs before the template is written: on any error the
//! template file is left byte-for-byte unmodified.

pub mod manifest;
pub mod template;

use std::path::Path;

use serde::Serialize;

use crate::core::scaffold;
use crate::core::{Error, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsReport {
    pub js_file: String,
    pub css_file: String,
    pub template: String,
    pub replacements: usize,
    pub written: bool,
}

/// Resolve the entry point's current asset names and patch the template.
pub fn sync(root: &Path) -> Result<AssetsReport> {
    let manifest_path = root.join(scaffold::MANIFEST_PATH);
    let manifest = manifest::load(&manifest_path)?;

    let entry = manifest.entry(scaffold::ENTRY_POINT).ok_or_else(|| {
        Error::assets_entry_missing(scaffold::ENTRY_POINT, manifest_path.display().to_string())
    })?;

    let css_file = entry.css.first().ok_or_else(|| {
        Error::assets_stylesheet_missing(
            scaffold::ENTRY_POINT,
            manifest_path.display().to_string(),
        )
    })?;

    let template_path = root.join(scaffold::TEMPLATE_PATH);
    if !template_path.is_file() {
        return Err(Error::assets_template_missing(
            template_path.display().to_string(),
        ));
    }

    let content = std::fs::read_to_string(&template_path).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("read {}", template_path.display())),
        )
    })?;

    let (patched, replacements) = template::patch(&content, &entry.file, css_file)?;

    let written = patched != content;
    if written {
        std::fs::write(&template_path, &patched).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("write {}", template_path.display())),
            )
        })?;
    }

    Ok(AssetsReport {
        js_file: entry.file.clone(),
        css_file: css_file.clone(),
        template: scaffold::TEMPLATE_PATH.to_string(),
        replacements,
        written,
    })
}
