//! List command implementation
//!
//! Without arguments, lists every job in creation order. With `--bundle`,
//! shows the currently-installed components of that bundle instead.

use std::path::PathBuf;

use console::Style;

use crate::cli::ListArgs;
use crate::commands::helpers::{
    component_status_style, format_age, job_status_style, open_runtime,
};
use crate::engine::BundleService;
use crate::error::Result;

/// Run list command
pub fn run(workspace: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let runtime = open_runtime(workspace)?;
    let service = BundleService::new(&runtime.store, &runtime.platform, &runtime.platform);

    match args.bundle {
        Some(bundle) => list_installed(&service, &bundle),
        None => list_jobs(&service),
    }
}

fn list_jobs(service: &BundleService<'_>) -> Result<()> {
    let jobs = service.jobs()?;
    if jobs.is_empty() {
        println!("No jobs yet.");
        return Ok(());
    }

    println!("Jobs ({}):", jobs.len());
    for job in jobs {
        println!(
            "  {}  {} {}  {}  {}",
            Style::new().bold().yellow().apply_to(&job.id),
            job.bundle,
            job.version,
            job_status_style(job.status).apply_to(job.status),
            Style::new().dim().apply_to(format_age(job.started_at)),
        );
    }
    Ok(())
}

fn list_installed(service: &BundleService<'_>, bundle: &str) -> Result<()> {
    let installed = service.installed(bundle)?;
    if installed.is_empty() {
        println!("Bundle '{}' has no installed components.", bundle);
        return Ok(());
    }

    println!(
        "Installed components of {} ({}):",
        Style::new().bold().yellow().apply_to(bundle),
        installed.len(),
    );
    for record in installed {
        println!(
            "  {:>18}  {} {}  {}",
            component_status_style(record.status).apply_to(record.status),
            record.kind,
            record.code,
            Style::new().dim().apply_to(&record.checksum[..21.min(record.checksum.len())]),
        );
    }
    Ok(())
}
