//! Status command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::StatusArgs;
use crate::commands::helpers::{
    component_status_style, format_age, job_status_style, open_runtime,
};
use crate::engine::BundleService;
use crate::error::Result;

/// Run status command
pub fn run(workspace: Option<PathBuf>, args: StatusArgs) -> Result<()> {
    let runtime = open_runtime(workspace)?;
    let service = BundleService::new(&runtime.store, &runtime.platform, &runtime.platform);

    let (job, records) = service.job_status(&args.job)?;

    println!("{}", Style::new().bold().yellow().apply_to(&job.id));
    println!(
        "  {} {} {}",
        Style::new().bold().apply_to("Bundle:"),
        job.bundle,
        job.version,
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Status:"),
        job_status_style(job.status).apply_to(job.status),
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Started:"),
        format_age(job.started_at),
    );
    if job.custom_installation {
        println!(
            "  {} yes",
            Style::new().bold().apply_to("Custom installation:")
        );
    }
    for (label, detail) in [
        ("Install error:", &job.install_error),
        ("Rollback error:", &job.rollback_error),
        ("Uninstall error:", &job.uninstall_error),
    ] {
        if let Some(detail) = detail {
            println!(
                "  {} {} ({})",
                Style::new().red().bold().apply_to(label),
                detail.message,
                detail.code,
            );
        }
    }

    if records.is_empty() {
        return Ok(());
    }
    println!();
    println!("  {}", Style::new().bold().apply_to("Components:"));
    for record in records {
        print!(
            "    {:>26}  {} {}",
            component_status_style(record.status).apply_to(record.status),
            record.kind,
            record.code,
        );
        if let Some(ref message) = record.error_message {
            print!("  {}", Style::new().red().apply_to(message));
        }
        println!();
    }
    Ok(())
}
