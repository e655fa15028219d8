//! Fixed layout of the DIRT stack template.
//!
//! Every project starts as a copy of the scaffold, so the identifiers and
//! paths the maintenance tools operate on are compile-time constants rather
//! than configuration.

use std::path::Path;

/// The scaffold's project identifier as it appears in paths and module names.
pub const SOURCE_NAME: &str = "dirt_stack";

/// Hyphenated form used in package manifests and URLs.
pub const SOURCE_NAME_HYPHENATED: &str = "dirt-stack";

/// Display forms used in README prose and page titles.
pub const SOURCE_TITLE: &str = "DIRT Stack";
pub const SOURCE_TITLE_LOWER: &str = "DIRT stack";

/// The Django project package inside `backend/`.
pub const SOURCE_PROJECT: &str = "dirt_project";
pub const SOURCE_PROJECT_TITLE: &str = "DIRT project";

/// Fully-qualified settings module referenced by the entry-point files.
pub const SETTINGS_MODULE: &str = "dirt_project.settings";

pub const BACKEND_DIR: &str = "backend";
pub const MANAGE_PY: &str = "manage.py";
pub const WSGI_PY: &str = "wsgi.py";

/// Vite build manifest, relative to the project root.
pub const MANIFEST_PATH: &str = "frontend/dist/.vite/manifest.json";

/// Django template holding the asset references, relative to the project root.
pub const TEMPLATE_PATH: &str = "backend/templates/app.html";

/// Frontend entry point whose generated asset names the patcher resolves.
pub const ENTRY_POINT: &str = "src/main.jsx";

/// Directories never walked, copied, or rewritten.
pub const SKIP_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    "node_modules",
    ".venv",
    "venv",
    "dist",
    "build",
];

/// Extensions of files that may contain textual project references.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "py", "js", "jsx", "json", "md", "txt", "html", "css", "sh", "bat", "yml", "yaml",
];

pub fn is_skipped_dir(name: &str) -> bool {
    SKIP_DIRS.contains(&name)
}

pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn text_file_matches_allow_list() {
        assert!(is_text_file(&PathBuf::from("backend/manage.py")));
        assert!(is_text_file(&PathBuf::from("frontend/src/main.jsx")));
        assert!(!is_text_file(&PathBuf::from("logo.png")));
        assert!(!is_text_file(&PathBuf::from("Makefile")));
    }

    #[test]
    fn skip_dirs_cover_dependency_caches() {
        assert!(is_skipped_dir("node_modules"));
        assert!(is_skipped_dir(".git"));
        assert!(!is_skipped_dir("backend"));
    }
}
