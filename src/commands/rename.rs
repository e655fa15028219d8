use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use homeboy::log_status;
use homeboy::prompt::{ConfirmListPrompt, PromptEngine, YesNoPrompt};
use homeboy::rename::{self, MatchPolicy, NewName, RenamePlan};
use homeboy::scaffold;
use homeboy::{Error, Result};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct RenameArgs {
    /// New project name (lowercase letters, numbers, underscores)
    pub new_name: String,

    /// Path match policy: substring, segment
    #[arg(long = "match", default_value = "substring")]
    pub match_policy: String,

    /// Compute and report the plan without prompting or mutating
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt (backup failure still aborts)
    #[arg(short, long)]
    pub yes: bool,

    /// Project root to rename (default: current directory)
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RenameOutput {
    #[serde(rename = "rename")]
    Rename {
        from: String,
        to: String,
        policy: String,
        dry_run: bool,
        cancelled: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        backup: Option<String>,
        total_changes: usize,
        edits: Vec<EditSummary>,
        renames: Vec<RenameSummary>,
        settings_updated: Vec<String>,
        failures: Vec<FailureSummary>,
        applied: bool,
    },
}

#[derive(Serialize)]
pub struct EditSummary {
    pub file: String,
    pub replacements: usize,
}

#[derive(Serialize)]
pub struct RenameSummary {
    pub from: String,
    pub to: String,
}

#[derive(Serialize)]
pub struct FailureSummary {
    pub path: String,
    pub action: String,
    pub error: String,
}

pub fn run(args: RenameArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RenameOutput> {
    // The scaffold accepts mixed-case input but project names are lowercase.
    let name = NewName::parse(&args.new_name.trim().to_lowercase())?;
    let policy = MatchPolicy::from_str(&args.match_policy)?;
    let root = resolve_root(args.path.as_deref())?;

    log_status!(
        "rename",
        "Renaming project '{}' to '{}' in {}",
        scaffold::SOURCE_NAME,
        name,
        root.display()
    );

    let plan = rename::plan(&root, &name, policy)?;

    if args.dry_run {
        return Ok((output_from_plan(&plan, true, false, None, None), 0));
    }

    let engine = PromptEngine::new();
    let confirmed = args.yes
        || engine.confirm_list(&ConfirmListPrompt {
            header: format!(
                "This will rename the project '{}' to '{}':",
                scaffold::SOURCE_NAME,
                name
            ),
            items: plan_summary_lines(&plan),
            confirm_question: format!("Rename to '{}'?", name),
            default: false,
        });

    if !confirmed {
        log_status!("rename", "Operation cancelled");
        return Ok((output_from_plan(&plan, false, true, None, None), 0));
    }

    let backup = match rename::backup::create(&root) {
        Ok(path) => {
            log_status!("rename", "Backup created: {}", path.display());
            Some(path.display().to_string())
        }
        Err(err) => {
            // Never mutate an unprotected tree without an explicit decision.
            if args.yes {
                return Err(err);
            }
            let proceed = engine.yes_no(&YesNoPrompt {
                question: format!("{}. Continue without a backup?", err),
                default: false,
            });
            if !proceed {
                return Err(Error::rename_cancelled("backup"));
            }
            None
        }
    };

    let report = rename::apply(&plan, &root);
    log_status!(
        "rename",
        "Updated {} files, renamed {} paths ({} failures)",
        report.files_rewritten,
        report.paths_renamed.len(),
        report.failures.len()
    );

    Ok((
        output_from_plan(&plan, false, false, backup, Some(report)),
        0,
    ))
}

fn resolve_root(path: Option<&str>) -> Result<PathBuf> {
    let root = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()
            .map_err(|e| Error::internal_io(e.to_string(), Some("current dir".to_string())))?,
    };

    // Canonical form so the root's own name is visible to the planner even
    // for roots given as '.' or with trailing components.
    root.canonicalize()
        .map_err(|e| Error::validation_invalid_argument("path", format!("'{}': {}", root.display(), e)))
}

fn plan_summary_lines(plan: &RenamePlan) -> Vec<String> {
    let mut lines = vec![
        format!("{} files to update", plan.edits.len()),
        format!("{} paths to rename", plan.path_renames.len()),
    ];
    if let Some(project_dir) = &plan.project_dir {
        lines.push(format!("{} -> {}", project_dir.from, project_dir.to));
    }
    if let Some(root_rename) = &plan.root_rename {
        lines.push(format!("project directory -> {}", root_rename));
    }
    if !plan.skipped.is_empty() {
        lines.push(format!("{} unreadable files skipped", plan.skipped.len()));
    }
    lines
}

fn output_from_plan(
    plan: &RenamePlan,
    dry_run: bool,
    cancelled: bool,
    backup: Option<String>,
    report: Option<rename::ApplyReport>,
) -> RenameOutput {
    let (renames, settings_updated, failures, applied) = match report {
        Some(report) => {
            let mut renames: Vec<RenameSummary> = report
                .paths_renamed
                .iter()
                .map(|r| RenameSummary {
                    from: r.from.clone(),
                    to: r.to.clone(),
                })
                .collect();
            if let Some(project_dir) = &report.project_dir_renamed {
                renames.push(RenameSummary {
                    from: project_dir.from.clone(),
                    to: project_dir.to.clone(),
                });
            }
            if let Some(root_renamed) = &report.root_renamed {
                renames.push(RenameSummary {
                    from: root_renamed.from.clone(),
                    to: root_renamed.to.clone(),
                });
            }
            let failures = report
                .failures
                .iter()
                .map(|f| FailureSummary {
                    path: f.path.clone(),
                    action: f.action.clone(),
                    error: f.error.clone(),
                })
                .collect();
            (renames, report.settings_updated.clone(), failures, true)
        }
        None => {
            // Dry-run / cancelled: report the planned renames instead.
            let mut renames: Vec<RenameSummary> = plan
                .path_renames
                .iter()
                .map(|r| RenameSummary {
                    from: r.from.clone(),
                    to: r.to.clone(),
                })
                .collect();
            if let Some(project_dir) = &plan.project_dir {
                renames.push(RenameSummary {
                    from: project_dir.from.clone(),
                    to: project_dir.to.clone(),
                });
            }
            (renames, Vec::new(), Vec::new(), false)
        }
    };

    RenameOutput::Rename {
        from: scaffold::SOURCE_NAME.to_string(),
        to: plan.new_name.as_str().to_string(),
        policy: plan.policy.as_str().to_string(),
        dry_run,
        cancelled,
        backup,
        total_changes: plan.total_changes(),
        edits: plan
            .edits
            .iter()
            .map(|e| EditSummary {
                file: e.file.clone(),
                replacements: e.replacements,
            })
            .collect(),
        renames,
        settings_updated,
        failures,
        applied,
    }
}
