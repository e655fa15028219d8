//! Sibling-directory backup snapshot.
//!
//! Taken before any mutation; there is no transactional rollback, so the
//! snapshot is the sole recovery path for a run that fails partway.

use std::path::{Path, PathBuf};

use crate::core::scaffold;
use crate::core::{Error, Result};

/// Copy the tree under `root` to a sibling directory tagged with the current
/// local time, skipping the denylisted directories. Returns the backup path.
pub fn create(root: &Path) -> Result<PathBuf> {
    let root = root
        .canonicalize()
        .map_err(|e| Error::backup_copy_failed(root.display().to_string(), e.to_string()))?;

    let root_name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("project");
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let dest = match root.parent() {
        Some(parent) => parent.join(format!("{}_backup_{}", root_name, stamp)),
        None => {
            return Err(Error::backup_copy_failed(
                root.display().to_string(),
                "project root has no parent directory".to_string(),
            ))
        }
    };

    copy_tree(&root, &dest).map_err(|e| {
        // Leave nothing half-copied behind.
        let _ = std::fs::remove_dir_all(&dest);
        Error::backup_copy_failed(dest.display().to_string(), e.to_string())
    })?;

    Ok(dest)
}

fn copy_tree(src: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dest)?;

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };

        if path.is_dir() {
            if scaffold::is_skipped_dir(&name) {
                continue;
            }
            copy_tree(&path, &dest.join(&name))?;
        } else {
            std::fs::copy(&path, dest.join(&name))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn backup_lands_beside_the_project() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("dirt_stack");
        fs::create_dir_all(root.join("backend")).unwrap();
        fs::write(root.join("backend").join("manage.py"), "print('hi')\n").unwrap();

        let dest = create(&root).unwrap();
        assert_eq!(dest.parent().unwrap(), parent.path().canonicalize().unwrap());
        assert!(dest
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("dirt_stack_backup_"));
        assert_eq!(
            fs::read_to_string(dest.join("backend").join("manage.py")).unwrap(),
            "print('hi')\n"
        );
    }

    #[test]
    fn backup_skips_denylisted_dirs() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("proj");
        fs::create_dir_all(root.join("node_modules").join("pkg")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src").join("app.js"), "x").unwrap();

        let dest = create(&root).unwrap();
        assert!(dest.join("src").join("app.js").is_file());
        assert!(!dest.join("node_modules").exists());
    }

    #[test]
    fn unreadable_root_fails_with_backup_code() {
        let err = create(Path::new("/nonexistent/not_a_project")).unwrap_err();
        assert_eq!(err.code, crate::core::ErrorCode::BackupCopyFailed);
    }
}
