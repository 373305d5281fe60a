//! Shell completions command

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::Result;

/// Generate completions for the requested shell on stdout
///
/// The shell is a clap value enum, so unsupported names are rejected at
/// parse time with the supported set in the error message.
pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "pagoda", &mut std::io::stdout().lock());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_completions_bash() {
        let args = CompletionsArgs {
            shell: clap_complete::Shell::Bash,
        };
        assert!(run(args).is_ok());
    }

    #[test]
    fn test_shell_parses_case_insensitively() {
        let cli = Cli::try_parse_from(["pagoda", "completions", "--shell", "Zsh"]).unwrap();
        match cli.command {
            crate::cli::Commands::Completions(args) => {
                assert_eq!(args.shell, clap_complete::Shell::Zsh);
            }
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_unknown_shell_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["pagoda", "completions", "--shell", "tcsh"]).is_err());
    }
}
