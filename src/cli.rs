//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pagoda - bundle installer for CMS platforms
///
/// Install and uninstall content bundles (services, widgets, pages and
/// friends) against a platform, with per-component tracking and rollback.
#[derive(Parser, Debug)]
#[command(
    name = "pagoda",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bundle installer for CMS platforms",
    long_about = "Pagoda installs content bundles onto a CMS platform: backend services, \
                  widgets, content types, templates and pages, applied in dependency order \
                  with per-component tracking, checksum-based skip/override resolution and \
                  automatic rollback on failure.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  pagoda install ./bundle.yaml\n    \
                  pagoda plan ./bundle.yaml\n    \
                  pagoda uninstall acme-site\n    \
                  pagoda status acme-site-1693000000000-0\n    \
                  pagoda list"
)]
pub struct Cli {
    /// Workspace directory (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "PAGODA_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a bundle onto the platform
    Install(InstallArgs),

    /// Uninstall a bundle from the platform
    Uninstall(UninstallArgs),

    /// Show what an install would do, without doing it
    Plan(PlanArgs),

    /// Show a job and its component records
    Status(StatusArgs),

    /// List jobs, or the installed components of a bundle
    List(ListArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install from the default manifest:\n    pagoda install\n\n\
                  Install a specific manifest:\n    pagoda install ./acme/bundle.yaml\n\n\
                  Fan components of one priority class out to 4 workers:\n    pagoda install --fan-out 4\n\n\
                  Shorten the service readiness wait:\n    pagoda install --ready-timeout 60")]
pub struct InstallArgs {
    /// Path to the bundle manifest
    #[arg(default_value = "bundle.yaml")]
    pub manifest: PathBuf,

    /// Worker threads per priority class (1 = fully sequential)
    #[arg(long, default_value_t = 1)]
    pub fan_out: usize,

    /// Seconds between service readiness polls
    #[arg(long, default_value_t = 5)]
    pub poll_interval: u64,

    /// Ceiling in seconds for each service readiness wait
    #[arg(long, default_value_t = 300)]
    pub ready_timeout: u64,
}

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Uninstall a bundle:\n    pagoda uninstall acme-site")]
pub struct UninstallArgs {
    /// Bundle to uninstall
    pub bundle: String,
}

/// Arguments for the plan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Plan from the default manifest:\n    pagoda plan\n\n\
                  Plan a specific manifest:\n    pagoda plan ./acme/bundle.yaml")]
pub struct PlanArgs {
    /// Path to the bundle manifest
    #[arg(default_value = "bundle.yaml")]
    pub manifest: PathBuf,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Job id to inspect
    pub job: String,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List all jobs:\n    pagoda list\n\n\
                  List the installed components of a bundle:\n    pagoda list --bundle acme-site")]
pub struct ListArgs {
    /// Show installed components of this bundle instead of jobs
    #[arg(long)]
    pub bundle: Option<String>,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    pagoda completions --shell bash > ~/.bash_completion.d/pagoda\n\n\
                  Generate zsh completions:\n    pagoda completions --shell zsh > ~/.zfunc/_pagoda")]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(long, value_enum, ignore_case = true)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_install_defaults() {
        let cli = Cli::try_parse_from(["pagoda", "install"]).unwrap();
        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.manifest, PathBuf::from("bundle.yaml"));
                assert_eq!(args.fan_out, 1);
                assert_eq!(args.poll_interval, 5);
                assert_eq!(args.ready_timeout, 300);
            }
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_install_with_options() {
        let cli = Cli::try_parse_from([
            "pagoda",
            "install",
            "./acme/bundle.yaml",
            "--fan-out",
            "4",
            "--ready-timeout",
            "60",
        ])
        .unwrap();
        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.manifest, PathBuf::from("./acme/bundle.yaml"));
                assert_eq!(args.fan_out, 4);
                assert_eq!(args.ready_timeout, 60);
            }
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_uninstall() {
        let cli = Cli::try_parse_from(["pagoda", "uninstall", "acme-site"]).unwrap();
        match cli.command {
            Commands::Uninstall(args) => assert_eq!(args.bundle, "acme-site"),
            _ => panic!("Expected Uninstall command"),
        }
    }

    #[test]
    fn test_cli_parsing_plan() {
        let cli = Cli::try_parse_from(["pagoda", "plan", "./b.yaml"]).unwrap();
        match cli.command {
            Commands::Plan(args) => assert_eq!(args.manifest, PathBuf::from("./b.yaml")),
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_cli_parsing_status() {
        let cli = Cli::try_parse_from(["pagoda", "status", "acme-1-0"]).unwrap();
        match cli.command {
            Commands::Status(args) => assert_eq!(args.job, "acme-1-0"),
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn test_cli_parsing_list_with_bundle() {
        let cli = Cli::try_parse_from(["pagoda", "list", "--bundle", "acme-site"]).unwrap();
        match cli.command {
            Commands::List(args) => assert_eq!(args.bundle.as_deref(), Some("acme-site")),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from(["pagoda", "-v", "-w", "/tmp/ws", "list"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.workspace, Some(PathBuf::from("/tmp/ws")));
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["pagoda", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }
}
