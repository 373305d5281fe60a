//! Uninstall command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::UninstallArgs;
use crate::commands::helpers::{component_status_style, job_status_style, open_runtime};
use crate::engine::BundleService;
use crate::error::Result;
use crate::job::JobStatus;
use crate::progress::ProgressDisplay;

/// Run uninstall command
pub fn run(workspace: Option<PathBuf>, verbose: bool, args: UninstallArgs) -> Result<()> {
    let runtime = open_runtime(workspace)?;
    let service = BundleService::new(&runtime.store, &runtime.platform, &runtime.platform);

    let installed = service.installed(&args.bundle)?;
    let progress = ProgressDisplay::start("Uninstalling", &args.bundle, installed.len());
    let result = service.uninstall(&args.bundle);
    match &result {
        Ok(_) => progress.finish(),
        Err(_) => progress.abandon(),
    }

    let job = result?;
    println!(
        "Uninstall job {} finished as {}",
        job.id,
        job_status_style(job.status).apply_to(job.status),
    );
    if let Some(ref detail) = job.uninstall_error {
        println!(
            "  {} {}",
            Style::new().red().bold().apply_to("error:"),
            detail.message
        );
    }

    if verbose || job.status != JobStatus::UninstallCompleted {
        let (_, records) = service.job_status(&job.id)?;
        for record in records {
            println!(
                "  {:>22}  {} {}",
                component_status_style(record.status).apply_to(record.status),
                record.kind,
                record.code,
            );
        }
    }

    if job.status != JobStatus::UninstallCompleted {
        std::process::exit(1);
    }
    Ok(())
}
