use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use homeboy::log_status;
use homeboy::{assets, Error, Result};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct AssetsArgs {
    /// Project root containing frontend/ and backend/ (default: current directory)
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum AssetsOutput {
    #[serde(rename = "assets.sync")]
    Sync {
        js_file: String,
        css_file: String,
        template: String,
        replacements: usize,
        written: bool,
    },
}

pub fn run(args: AssetsArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<AssetsOutput> {
    let root = resolve_root(args.path.as_deref())?;
    let report = assets::sync(&root)?;

    log_status!(
        "assets",
        "Template references {} and {}{}",
        report.js_file,
        report.css_file,
        if report.written { "" } else { " (already current)" }
    );

    Ok((
        AssetsOutput::Sync {
            js_file: report.js_file,
            css_file: report.css_file,
            template: report.template,
            replacements: report.replacements,
            written: report.written,
        },
        0,
    ))
}

fn resolve_root(path: Option<&str>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(PathBuf::from(p)),
        None => std::env::current_dir()
            .map_err(|e| Error::internal_io(e.to_string(), Some("current dir".to_string()))),
    }
}
