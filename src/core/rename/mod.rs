//! Project rename engine.
//!
//! Renaming happens in two explicitly separated phases:
//! 1. `plan()` scans the tree read-only and computes every intended content
//!    edit and path rename (plus the hand-identified settings-module steps).
//! 2. `apply()` sequences the plan against the filesystem, tolerating
//!    per-item failures.
//!
//! `backup::create()` snapshots the tree to a sibling directory before any
//! mutation; the snapshot is the sole recovery mechanism.

pub mod backup;

mod apply;
mod name;
mod plan;

pub use apply::{apply, ApplyReport, ItemFailure};
pub use name::NewName;
pub use plan::{plan, ContentEdit, MatchPolicy, PathRename, PlanSkip, RenamePlan};
