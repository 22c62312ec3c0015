use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the project bootstrap orchestrator.
#[derive(Parser, Debug)]
#[command(
    name = "setup",
    about = "Cross-platform project bootstrap and build orchestrator",
    version
)]
pub struct Cli {
    /// Subcommand to run; defaults to `setup`.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Run unattended: skip the connectivity check and every prompt
    /// (also triggered by CI=true in the environment)
    #[arg(long, global = true)]
    pub unattended: bool,

    /// Override the project root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bootstrap the project: validate, sync, configure and build
    Setup,
    /// Print version information
    Version,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_has_no_subcommand() {
        let cli = Cli::parse_from(["setup"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.global.unattended);
    }

    #[test]
    fn parse_explicit_setup() {
        let cli = Cli::parse_from(["setup", "setup"]);
        assert!(matches!(cli.command, Some(Command::Setup)));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["setup", "version"]);
        assert!(matches!(cli.command, Some(Command::Version)));
    }

    #[test]
    fn parse_verbose_short() {
        let cli = Cli::parse_from(["setup", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_unattended() {
        let cli = Cli::parse_from(["setup", "--unattended"]);
        assert!(cli.global.unattended);
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["setup", "--root", "/tmp/project"]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/tmp/project")));
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::parse_from(["setup", "setup", "--unattended", "-v"]);
        assert!(cli.global.unattended);
        assert!(cli.verbose);
    }
}
