//! Install command implementation
//!
//! Loads the manifest, prints the resolved plan, then runs the install
//! job to a terminal status. The process exits non-zero when the job does
//! not end in `INSTALL_COMPLETED`, so scripts can gate on it.

use std::path::PathBuf;
use std::time::Duration;

use console::Style;

use crate::cli::InstallArgs;
use crate::commands::helpers::{action_style, component_status_style, job_status_style, open_runtime};
use crate::engine::{BundleService, ReadinessProbe};
use crate::error::Result;
use crate::job::{Job, JobStatus};
use crate::manifest::BundleManifest;
use crate::progress::ProgressDisplay;

/// Run install command
pub fn run(workspace: Option<PathBuf>, verbose: bool, args: InstallArgs) -> Result<()> {
    let runtime = open_runtime(workspace)?;
    let manifest = BundleManifest::load(&args.manifest)?;

    let probe = ReadinessProbe::new(
        Duration::from_secs(args.poll_interval),
        Duration::from_secs(args.ready_timeout),
    );
    let service = BundleService::new(&runtime.store, &runtime.platform, &runtime.platform)
        .with_readiness(probe)
        .with_parallelism(args.fan_out);

    println!(
        "Installing {} {} ({} components)",
        Style::new().bold().yellow().apply_to(&manifest.bundle),
        manifest.version,
        manifest.descriptor_count(),
    );

    let plan = service.plan(&manifest)?;
    for entry in &plan.entries {
        println!(
            "  {:>8}  {} {}",
            action_style(entry.action).apply_to(entry.action),
            entry.kind,
            entry.code,
        );
    }
    println!();

    let progress = ProgressDisplay::start("Installing", &manifest.bundle, plan.entries.len());
    let result = service.install(&manifest);
    match &result {
        Ok(_) => progress.finish(),
        Err(_) => progress.abandon(),
    }

    let job = result?;
    report(&service, &job, verbose)?;

    if job.status != JobStatus::InstallCompleted {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the job outcome, with per-component detail when verbose or failed
fn report(service: &BundleService<'_>, job: &Job, verbose: bool) -> Result<()> {
    println!(
        "{} job {} finished as {}",
        if job.status.is_uninstall() { "Uninstall" } else { "Install" },
        job.id,
        job_status_style(job.status).apply_to(job.status),
    );

    if let Some(ref detail) = job.install_error {
        println!("  {} {}", Style::new().red().bold().apply_to("error:"), detail.message);
    }
    if let Some(ref detail) = job.rollback_error {
        println!(
            "  {} {}",
            Style::new().red().bold().apply_to("rollback error:"),
            detail.message
        );
    }
    if let Some(ref detail) = job.uninstall_error {
        println!("  {} {}", Style::new().red().bold().apply_to("error:"), detail.message);
    }

    if verbose || job.status != JobStatus::InstallCompleted {
        let (_, records) = service.job_status(&job.id)?;
        for record in records {
            println!(
                "  {:>26}  {} {}",
                component_status_style(record.status).apply_to(record.status),
                record.kind,
                record.code,
            );
        }
    }
    Ok(())
}
