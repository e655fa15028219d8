use std::path::Path;

use serde::Serialize;

use crate::core::rename::{PathRename, RenamePlan};
use crate::core::scaffold;

/// A single filesystem operation that failed during apply. Never fatal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    pub path: String,
    pub action: String,
    pub error: String,
}

/// Per-item outcomes of the apply phase.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    pub files_rewritten: usize,
    pub paths_renamed: Vec<PathRename>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_dir_renamed: Option<PathRename>,
    pub settings_updated: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_renamed: Option<PathRename>,
    pub failures: Vec<ItemFailure>,
}

impl ApplyReport {
    fn record_failure(&mut self, path: &str, action: &str, error: impl ToString) {
        self.failures.push(ItemFailure {
            path: path.to_string(),
            action: action.to_string(),
            error: error.to_string(),
        });
    }
}

/// Apply a rename plan to the tree under `root`.
///
/// Sequencing: content edits first (paths are still the planned ones), then
/// generic path renames deepest-first so children move before their parents,
/// then the exact project-directory rename, then the settings-module rewrite
/// of the entry-point files. Each operation is wrapped individually; failures
/// are recorded and the apply continues.
pub fn apply(plan: &RenamePlan, root: &Path) -> ApplyReport {
    let mut report = ApplyReport {
        files_rewritten: 0,
        paths_renamed: Vec::new(),
        project_dir_renamed: None,
        settings_updated: Vec::new(),
        root_renamed: None,
        failures: Vec::new(),
    };

    for edit in &plan.edits {
        let path = root.join(&edit.file);
        match std::fs::write(&path, &edit.new_content) {
            Ok(()) => report.files_rewritten += 1,
            Err(e) => report.record_failure(&edit.file, "write", e),
        }
    }

    // Deepest paths first: renaming a child never invalidates the planned
    // path of its parent, and parents rename last.
    let mut renames = plan.path_renames.clone();
    renames.sort_by(|a, b| {
        b.from
            .matches('/')
            .count()
            .cmp(&a.from.matches('/').count())
    });

    for rename in &renames {
        let from = root.join(&rename.from);
        let to = root.join(&rename.to);
        match std::fs::rename(&from, &to) {
            Ok(()) => report.paths_renamed.push(rename.clone()),
            Err(e) => report.record_failure(&rename.from, "rename", e),
        }
    }

    if let Some(project_dir) = &plan.project_dir {
        let from = root.join(&project_dir.from);
        let to = root.join(&project_dir.to);
        match std::fs::rename(&from, &to) {
            Ok(()) => report.project_dir_renamed = Some(project_dir.clone()),
            Err(e) => report.record_failure(&project_dir.from, "rename", e),
        }
    }

    // Hand-identified migration points. The generic content pass usually
    // covers these already, in which case the replace is a no-op and the
    // file is not rewritten.
    let new_settings = plan.new_name.settings_module();
    for file in &plan.settings_files {
        let path = root.join(file);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                report.record_failure(file, "read", e);
                continue;
            }
        };

        let updated = content.replace(scaffold::SETTINGS_MODULE, &new_settings);
        if updated != content {
            match std::fs::write(&path, updated) {
                Ok(()) => report.settings_updated.push(file.clone()),
                Err(e) => report.record_failure(file, "write", e),
            }
        }
    }

    // The root directory renames last: nothing inside it is touched after
    // this, and the caller's original path simply stops existing.
    if let Some(new_root_name) = &plan.root_rename {
        let old_name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match root.parent() {
            Some(parent) => {
                let to = parent.join(new_root_name);
                match std::fs::rename(root, &to) {
                    Ok(()) => {
                        report.root_renamed = Some(PathRename {
                            from: old_name,
                            to: new_root_name.clone(),
                        })
                    }
                    Err(e) => report.record_failure(&old_name, "rename", e),
                }
            }
            None => report.record_failure(&old_name, "rename", "root has no parent directory"),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rename::{plan, MatchPolicy, NewName};
    use std::fs;

    fn apply_to(dir: &Path) -> ApplyReport {
        let name = NewName::parse("myapp").unwrap();
        let plan = plan(dir, &name, MatchPolicy::Substring).unwrap();
        apply(&plan, dir)
    }

    #[test]
    fn nested_matching_dirs_rename_without_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let child = dir.path().join("dirt_stack_docs").join("dirt_stack_api");
        fs::create_dir_all(&child).unwrap();
        fs::write(child.join("index.md"), "see dirt_stack\n").unwrap();

        let report = apply_to(dir.path());
        assert!(report.failures.is_empty(), "failures: {:?}", report.failures);
        assert!(dir
            .path()
            .join("myapp_docs")
            .join("myapp_api")
            .join("index.md")
            .is_file());
    }

    #[test]
    fn edits_land_before_renames() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dirt_stack.md"), "# DIRT Stack\n").unwrap();

        let report = apply_to(dir.path());
        assert_eq!(report.files_rewritten, 1);
        assert_eq!(report.paths_renamed.len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("myapp.md")).unwrap(),
            "# Myapp\n"
        );
    }

    #[test]
    fn rename_failure_is_recorded_and_run_continues() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("keep_dirt_stack.txt"), "x").unwrap();

        let name = NewName::parse("myapp").unwrap();
        let mut plan = plan(dir.path(), &name, MatchPolicy::Substring).unwrap();
        // Sabotage one rename so it fails, keep a valid one after it.
        plan.path_renames.insert(
            0,
            PathRename {
                from: "missing_dirt_stack.txt".to_string(),
                to: "missing_myapp.txt".to_string(),
            },
        );

        let report = apply(&plan, dir.path());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].action, "rename");
        assert!(dir.path().join("keep_myapp.txt").is_file());
    }

    #[test]
    fn settings_rewrite_is_noop_when_generic_pass_covered_it() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("backend").join("dirt_project");
        fs::create_dir_all(&project).unwrap();
        // manage.py is allow-listed, so the generic pass rewrites it; the
        // settings step then finds nothing left to do.
        fs::write(
            dir.path().join("backend").join("manage.py"),
            "os.environ.setdefault('DJANGO_SETTINGS_MODULE', 'dirt_project.settings')\n",
        )
        .unwrap();
        fs::write(project.join("wsgi.py"), "application = get_wsgi_application()\n").unwrap();

        let report = apply_to(dir.path());
        assert!(report.settings_updated.is_empty());
        let manage = fs::read_to_string(dir.path().join("backend").join("manage.py")).unwrap();
        assert!(manage.contains("myapp_project.settings"));
        assert!(dir.path().join("backend").join("myapp_project").is_dir());
    }
}
