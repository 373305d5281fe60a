//! Shared helpers for command implementations

use std::path::PathBuf;

use console::Style;

use crate::clients::LocalPlatform;
use crate::error::{PagodaError, Result};
use crate::job::{ComponentStatus, InstallAction, JobStatus, now_millis};
use crate::store::FileStore;

/// Everything a command needs to talk to one workspace
///
/// The job store lives under `.pagoda/` in the workspace; the platform
/// sandbox under `platform/`.
pub struct Runtime {
    pub store: FileStore,
    pub platform: LocalPlatform,
}

/// Get workspace path from CLI argument or current directory
pub fn workspace_path(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| PagodaError::IoError {
            message: format!("Failed to get current directory: {}", e),
        }),
    }
}

/// Open the store and platform for a workspace
pub fn open_runtime(workspace: Option<PathBuf>) -> Result<Runtime> {
    let root = workspace_path(workspace)?;
    let store = FileStore::open(&root.join(".pagoda").join("jobs.json"))?;
    let platform = LocalPlatform::new(&root.join("platform"));
    Ok(Runtime { store, platform })
}

/// Style for a job status
pub fn job_status_style(status: JobStatus) -> Style {
    match status {
        JobStatus::InstallCompleted | JobStatus::UninstallCompleted => Style::new().green().bold(),
        JobStatus::InstallError
        | JobStatus::InstallRollbackError
        | JobStatus::UninstallError => Style::new().red().bold(),
        JobStatus::InstallRollback => Style::new().yellow().bold(),
        _ => Style::new().cyan(),
    }
}

/// Style for a component status
pub fn component_status_style(status: ComponentStatus) -> Style {
    match status {
        ComponentStatus::InstallCompleted | ComponentStatus::UninstallCompleted => {
            Style::new().green()
        }
        ComponentStatus::InstallError
        | ComponentStatus::InstallRollbackError
        | ComponentStatus::UninstallError => Style::new().red(),
        ComponentStatus::InstallRollback => Style::new().yellow(),
        _ => Style::new().cyan(),
    }
}

/// Style for a planned action
pub fn action_style(action: InstallAction) -> Style {
    match action {
        InstallAction::Create => Style::new().green(),
        InstallAction::Override => Style::new().yellow(),
        InstallAction::Skip => Style::new().dim(),
    }
}

/// Age of an epoch-millisecond timestamp, humanized
pub fn format_age(epoch_ms: u64) -> String {
    let elapsed_ms = now_millis().saturating_sub(epoch_ms);
    let seconds = elapsed_ms / 1000;
    if seconds < 60 {
        format!("{}s ago", seconds)
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86_400)
    }
}
