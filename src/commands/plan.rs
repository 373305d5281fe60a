//! Plan command implementation
//!
//! Read-only preview: resolves per-component actions and service drift
//! without creating a job or touching the platform.

use std::path::PathBuf;

use console::Style;

use crate::cli::PlanArgs;
use crate::commands::helpers::{action_style, open_runtime};
use crate::engine::{BundleService, DriftStatus};
use crate::error::Result;
use crate::manifest::BundleManifest;

/// Run plan command
pub fn run(workspace: Option<PathBuf>, args: PlanArgs) -> Result<()> {
    let runtime = open_runtime(workspace)?;
    let manifest = BundleManifest::load(&args.manifest)?;
    let service = BundleService::new(&runtime.store, &runtime.platform, &runtime.platform);

    println!(
        "Plan for {} {}:",
        Style::new().bold().yellow().apply_to(&manifest.bundle),
        manifest.version,
    );

    let plan = service.plan(&manifest)?;
    if plan.entries.is_empty() {
        println!("  (empty bundle)");
        return Ok(());
    }
    for entry in &plan.entries {
        println!(
            "  {:>8}  {} {}",
            action_style(entry.action).apply_to(entry.action),
            entry.kind,
            entry.code,
        );
    }

    if !manifest.services.is_empty() {
        println!();
        println!("Service drift:");
        for drift in service.service_drift(&manifest)? {
            let style = match drift.status {
                DriftStatus::New => Style::new().green(),
                DriftStatus::Equal => Style::new().dim(),
                DriftStatus::Diff => Style::new().yellow().bold(),
            };
            println!("  {:>6}  {}", style.apply_to(drift.status), drift.code);
        }
    }

    if plan.is_custom() {
        println!();
        println!("This would be a custom installation (not everything is a fresh CREATE).");
    }
    Ok(())
}
