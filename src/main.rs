//! Pagoda - bundle installer for CMS platforms
//!
//! Installs content bundles (backend services, widgets, content types,
//! templates, pages) onto a platform in dependency order, with
//! per-component tracking, checksum-based skip/override resolution and
//! automatic rollback on failure.

use clap::Parser;

mod cli;
mod clients;
mod commands;
mod domain;
mod engine;
mod error;
mod hash;
mod job;
mod manifest;
mod progress;
mod store;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(cli.workspace, cli.verbose, args),
        Commands::Uninstall(args) => commands::uninstall::run(cli.workspace, cli.verbose, args),
        Commands::Plan(args) => commands::plan::run(cli.workspace, args),
        Commands::Status(args) => commands::status::run(cli.workspace, args),
        Commands::List(args) => commands::list::run(cli.workspace, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
