//! CLI definition and command handling

pub mod commands;
pub mod output;
pub mod prompt;

use clap::{Parser, Subcommand};

use commands::DeployCommand;

use crate::exit_codes;

/// Printed for a missing or unknown subcommand
pub const USAGE: &str = "Usage: deployease deploy";

/// DeployEase - detect your hosting platform and deploy with its own CLI
#[derive(Debug, Parser)]
#[command(name = "deployease")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect the project's platform and deploy it
    Deploy(DeployCommand),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub fn execute(&self) -> anyhow::Result<i32> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match &self.command {
            Some(Commands::Deploy(cmd)) => cmd.execute(self),
            None => {
                println!("{}", USAGE);
                Ok(exit_codes::SUCCESS)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deploy_with_options() {
        let cli = Cli::try_parse_from([
            "deployease",
            "deploy",
            "--platform",
            "netlify",
            "--yes",
            "--format",
            "json",
            "-C",
            "site",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.directory.as_deref(), Some(std::path::Path::new("site")));
        match cli.command {
            Some(Commands::Deploy(cmd)) => {
                assert_eq!(cmd.platform.as_deref(), Some("netlify"));
                assert!(cmd.yes);
            }
            None => panic!("expected deploy command"),
        }
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["deployease", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_unknown_subcommand_is_a_parse_error() {
        assert!(Cli::try_parse_from(["deployease", "publish"]).is_err());
    }
}
