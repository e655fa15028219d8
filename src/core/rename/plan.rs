use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::rename::NewName;
use crate::core::scaffold;
use crate::core::{Error, Result};

/// How path components are matched against the scaffold identifier.
///
/// `Substring` reproduces the scaffold script's behavior: any file or
/// directory name containing `dirt_stack` is rewritten, including names like
/// `mydirt_stackapp`. `Segment` only rewrites names that are exactly the
/// identifier or the identifier plus an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    Substring,
    Segment,
}

impl MatchPolicy {
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "substring" => Ok(MatchPolicy::Substring),
            "segment" => Ok(MatchPolicy::Segment),
            _ => Err(Error::validation_invalid_argument(
                "match",
                format!("Unknown match policy '{}'. Use: substring, segment", s),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Substring => "substring",
            MatchPolicy::Segment => "segment",
        }
    }

    /// Rewrite a single file or directory name, or None when it doesn't match.
    fn rename_component(&self, file_name: &str, to: &str) -> Option<String> {
        match self {
            MatchPolicy::Substring => {
                if file_name.contains(scaffold::SOURCE_NAME) {
                    Some(file_name.replace(scaffold::SOURCE_NAME, to))
                } else {
                    None
                }
            }
            MatchPolicy::Segment => {
                if file_name == scaffold::SOURCE_NAME {
                    return Some(to.to_string());
                }
                let rest = file_name.strip_prefix(scaffold::SOURCE_NAME)?;
                if rest.starts_with('.') {
                    Some(format!("{}{}", to, rest))
                } else {
                    None
                }
            }
        }
    }
}

/// A content rewrite for one file.
#[derive(Debug, Clone, Serialize)]
pub struct ContentEdit {
    /// File path relative to root.
    pub file: String,
    /// Number of literal replacements in this file.
    pub replacements: usize,
    /// New content after all replacements.
    #[serde(skip)]
    pub new_content: String,
}

/// A file or directory rename.
#[derive(Debug, Clone, Serialize)]
pub struct PathRename {
    /// Original path relative to root.
    pub from: String,
    /// New path relative to root.
    pub to: String,
}

/// A file the planner could not read; reported, never fatal.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSkip {
    pub file: String,
    pub error: String,
}

/// The full set of intended changes, computed without touching the tree.
#[derive(Debug, Clone)]
pub struct RenamePlan {
    pub new_name: NewName,
    pub policy: MatchPolicy,
    /// Content rewrites, only for files where a substitution changed something.
    pub edits: Vec<ContentEdit>,
    /// Generic renames of names containing the scaffold identifier.
    pub path_renames: Vec<PathRename>,
    /// Exact-path rename of the Django project package, when present.
    pub project_dir: Option<PathRename>,
    /// New name for the project root directory itself, when its own name
    /// matches the policy. Applied last, after everything inside has moved.
    pub root_rename: Option<String>,
    /// Entry-point files to re-point at the new settings module, as they will
    /// be located after the renames above have been applied.
    pub settings_files: Vec<String>,
    /// Files skipped because they could not be read.
    pub skipped: Vec<PlanSkip>,
}

impl RenamePlan {
    pub fn total_changes(&self) -> usize {
        self.edits.len()
            + self.path_renames.len()
            + usize::from(self.project_dir.is_some())
            + usize::from(self.root_rename.is_some())
            + self.settings_files.len()
    }
}

struct TreeScan {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

fn scan_tree(root: &Path) -> TreeScan {
    let mut scan = TreeScan {
        files: Vec::new(),
        dirs: Vec::new(),
    };
    scan_recursive(root, &mut scan);
    scan
}

fn scan_recursive(dir: &Path, scan: &mut TreeScan) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if scaffold::is_skipped_dir(&name) {
                continue;
            }
            scan.dirs.push(path.clone());
            scan_recursive(&path, scan);
        } else {
            scan.files.push(path);
        }
    }
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Compute the full rename plan for the tree under `root`.
///
/// Planning never writes: the result lists content edits (files where at
/// least one substitution changed the content), path renames under the given
/// match policy, and the two hand-identified settings-module migration points.
pub fn plan(root: &Path, name: &NewName, policy: MatchPolicy) -> Result<RenamePlan> {
    if !root.is_dir() {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("'{}' is not a directory", root.display()),
        ));
    }

    let scan = scan_tree(root);
    let substitutions = name.substitutions();

    // Content pass: allow-listed extensions only, and only files where a
    // substitution actually changes something.
    let mut edits = Vec::new();
    let mut skipped = Vec::new();
    for file in scan.files.iter().filter(|f| scaffold::is_text_file(f)) {
        let content = match std::fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                skipped.push(PlanSkip {
                    file: relative(file, root),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let mut new_content = content.clone();
        let mut replacements = 0;
        for (from, to) in &substitutions {
            let count = new_content.matches(from.as_str()).count();
            if count > 0 {
                new_content = new_content.replace(from.as_str(), to.as_str());
                replacements += count;
            }
        }

        if replacements > 0 && new_content != content {
            edits.push(ContentEdit {
                file: relative(file, root),
                replacements,
                new_content,
            });
        }
    }

    // Path pass: every walked file and directory whose own name matches the
    // policy. Only the final component is rewritten; apply() orders renames
    // deepest-first so parent renames never invalidate child paths.
    let mut path_renames = Vec::new();
    for path in scan.files.iter().chain(scan.dirs.iter()) {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(new_component) = policy.rename_component(file_name, name.as_str()) {
            let from = relative(path, root);
            let to = match path.parent().filter(|p| *p != root) {
                Some(parent) => format!("{}/{}", relative(parent, root), new_component),
                None => new_component,
            };
            path_renames.push(PathRename { from, to });
        }
    }

    // Special steps: the Django project package is renamed by exact path, and
    // the entry-point files get their settings-module reference re-pointed.
    let backend = root.join(scaffold::BACKEND_DIR);
    let project_dir = if backend.join(scaffold::SOURCE_PROJECT).is_dir() {
        Some(PathRename {
            from: format!("{}/{}", scaffold::BACKEND_DIR, scaffold::SOURCE_PROJECT),
            to: format!("{}/{}", scaffold::BACKEND_DIR, name.project_module()),
        })
    } else {
        None
    };

    let root_rename = root
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| policy.rename_component(n, name.as_str()));

    let mut settings_files = Vec::new();
    if backend.join(scaffold::MANAGE_PY).is_file() {
        settings_files.push(format!(
            "{}/{}",
            scaffold::BACKEND_DIR,
            scaffold::MANAGE_PY
        ));
    }
    if project_dir.is_some()
        && backend
            .join(scaffold::SOURCE_PROJECT)
            .join(scaffold::WSGI_PY)
            .is_file()
    {
        settings_files.push(format!(
            "{}/{}/{}",
            scaffold::BACKEND_DIR,
            name.project_module(),
            scaffold::WSGI_PY
        ));
    }

    Ok(RenamePlan {
        new_name: name.clone(),
        policy,
        edits,
        path_renames,
        project_dir,
        root_rename,
        settings_files,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn planned(dir: &Path, policy: MatchPolicy) -> RenamePlan {
        let name = NewName::parse("myapp").unwrap();
        plan(dir, &name, policy).unwrap()
    }

    #[test]
    fn all_four_display_forms_replaced_in_one_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("README.md"),
            "# DIRT Stack\nthe DIRT stack ships as dirt_stack, published as dirt-stack.\n",
        )
        .unwrap();

        let plan = planned(dir.path(), MatchPolicy::Substring);
        assert_eq!(plan.edits.len(), 1);
        let edit = &plan.edits[0];
        assert_eq!(edit.replacements, 4);
        assert_eq!(
            edit.new_content,
            "# Myapp\nthe Myapp ships as myapp, published as myapp.\n"
        );
    }

    #[test]
    fn untouched_file_produces_no_edit() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "nothing to see here\n").unwrap();

        let plan = planned(dir.path(), MatchPolicy::Substring);
        assert!(plan.edits.is_empty());
    }

    #[test]
    fn binary_extensions_not_scanned_for_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cover.png"), "dirt_stack").unwrap();

        let plan = planned(dir.path(), MatchPolicy::Substring);
        assert!(plan.edits.is_empty());
        // The name itself has no match, so no path rename either.
        assert!(plan.path_renames.is_empty());
    }

    #[test]
    fn skip_dirs_pruned_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("frontend").join("node_modules");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("dirt_stack.js"), "dirt_stack").unwrap();

        let plan = planned(dir.path(), MatchPolicy::Substring);
        assert!(plan.edits.is_empty());
        assert!(plan.path_renames.is_empty());
    }

    #[test]
    fn nested_matching_dirs_both_planned() {
        let dir = tempfile::tempdir().unwrap();
        let child = dir.path().join("dirt_stack_docs").join("dirt_stack_api");
        fs::create_dir_all(&child).unwrap();

        let plan = planned(dir.path(), MatchPolicy::Substring);
        let froms: Vec<&str> = plan.path_renames.iter().map(|r| r.from.as_str()).collect();
        assert!(froms.contains(&"dirt_stack_docs"));
        assert!(froms.contains(&"dirt_stack_docs/dirt_stack_api"));
    }

    #[test]
    fn substring_policy_matches_inside_longer_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mydirt_stackapp.txt"), "x").unwrap();

        let plan = planned(dir.path(), MatchPolicy::Substring);
        assert_eq!(plan.path_renames.len(), 1);
        assert_eq!(plan.path_renames[0].to, "mymyappapp.txt");
    }

    #[test]
    fn segment_policy_requires_whole_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mydirt_stackapp.txt"), "x").unwrap();
        fs::write(dir.path().join("dirt_stack.md"), "x").unwrap();
        fs::create_dir(dir.path().join("dirt_stack")).unwrap();

        let plan = planned(dir.path(), MatchPolicy::Segment);
        let froms: Vec<&str> = plan.path_renames.iter().map(|r| r.from.as_str()).collect();
        assert!(!froms.contains(&"mydirt_stackapp.txt"));
        assert!(froms.contains(&"dirt_stack.md"));
        assert!(froms.contains(&"dirt_stack"));
    }

    #[test]
    fn project_dir_and_settings_files_detected() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("backend").join("dirt_project");
        fs::create_dir_all(&project).unwrap();
        fs::write(dir.path().join("backend").join("manage.py"), "dirt_project.settings").unwrap();
        fs::write(project.join("wsgi.py"), "dirt_project.settings").unwrap();

        let plan = planned(dir.path(), MatchPolicy::Substring);
        let project_dir = plan.project_dir.as_ref().unwrap();
        assert_eq!(project_dir.from, "backend/dirt_project");
        assert_eq!(project_dir.to, "backend/myapp_project");
        assert_eq!(
            plan.settings_files,
            vec!["backend/manage.py", "backend/myapp_project/wsgi.py"]
        );
    }

    #[test]
    fn match_policy_parses() {
        assert_eq!(
            MatchPolicy::from_str("substring").unwrap(),
            MatchPolicy::Substring
        );
        assert_eq!(
            MatchPolicy::from_str("segment").unwrap(),
            MatchPolicy::Segment
        );
        assert!(MatchPolicy::from_str("fuzzy").is_err());
    }

    #[test]
    fn planning_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.py"), "import dirt_stack\n").unwrap();

        let plan = planned(dir.path(), MatchPolicy::Substring);
        assert_eq!(plan.edits.len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("app.py")).unwrap(),
            "import dirt_stack\n"
        );
    }
}
