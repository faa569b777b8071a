//! Deploy command

use clap::Args;
use tracing::{debug, info};

use deployease_core::config::load_config_or_default;
use deployease_core::{
    DefaultsPrompt, EchoTarget, Prompt, Reporter, SystemExecutor, TracingReporter,
};
use deployease_platforms::{DeployContext, DeployOutcome, PlatformRegistry};

use crate::cli::output::{self, ConsoleReporter};
use crate::cli::prompt::TerminalPrompt;
use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

/// Detect the project's platform and deploy it
#[derive(Debug, Args)]
pub struct DeployCommand {
    /// Platform to deploy to instead of detecting one (e.g. netlify, "GitHub Pages")
    #[arg(short, long, env = "DEPLOYEASE_PLATFORM")]
    pub platform: Option<String>,

    /// Accept every default instead of prompting
    #[arg(short, long)]
    pub yes: bool,
}

impl DeployCommand {
    /// Execute the deploy command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!("executing deploy command");
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd)?;
        if let Some(path) = &config_path {
            debug!(path = %path.display(), "using config file");
        }

        let requested = self.platform.as_deref().or(config.platform.as_deref());

        let prompt: Box<dyn Prompt> = if self.yes {
            Box::new(DefaultsPrompt)
        } else {
            Box::new(TerminalPrompt)
        };
        let reporter: Box<dyn Reporter> = if cli.quiet || cli.format == OutputFormat::Json {
            Box::new(TracingReporter)
        } else {
            Box::new(ConsoleReporter)
        };
        let executor = executor_for(cli);
        let ctx = DeployContext::new(
            &cwd,
            &config,
            &executor,
            prompt.as_ref(),
            reporter.as_ref(),
        );

        let registry = PlatformRegistry::new();
        let outcome = deployease_platforms::deploy(&registry, &ctx, requested)?;

        print_outcome(cli, &outcome)?;
        Ok(if outcome.success {
            exit_codes::SUCCESS
        } else {
            exit_codes::ERROR
        })
    }
}

/// JSON output owns stdout, so vendor CLI output goes to stderr
fn executor_for(cli: &Cli) -> SystemExecutor {
    let echo = match cli.format {
        OutputFormat::Json => EchoTarget::Stderr,
        OutputFormat::Text => EchoTarget::Stdout,
    };
    SystemExecutor::new().echo_to(echo)
}

fn print_outcome(cli: &Cli, outcome: &DeployOutcome) -> anyhow::Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
        OutputFormat::Text if cli.quiet => {
            if let Some(error) = &outcome.error {
                output::error(error);
            }
        }
        OutputFormat::Text => {
            println!();
            println!("{}", output::key_value("Platform", &outcome.platform));
            if let Some(url) = &outcome.url {
                println!("{}", output::key_value("URL", url));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_json_output_echoes_vendor_output_to_stderr() {
        let cli = Cli::try_parse_from(["deployease", "--format", "json", "deploy"]).unwrap();
        assert_eq!(executor_for(&cli).echo(), EchoTarget::Stderr);
    }

    #[test]
    fn test_text_output_echoes_vendor_output_to_stdout() {
        let cli = Cli::try_parse_from(["deployease", "deploy"]).unwrap();
        assert_eq!(executor_for(&cli).echo(), EchoTarget::Stdout);
    }
}
