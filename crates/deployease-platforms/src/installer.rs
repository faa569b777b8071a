//! Vendor CLI availability
//!
//! Vendor CLIs are npm packages. A missing CLI is installed globally when
//! allowed; otherwise the run falls back to invoking it through `npx`. The
//! choice is returned as a [`CliInvocation`] and stored on the run's plan.

use deployease_core::{CommandLine, ExecMode};
use tracing::{info, warn};

use crate::context::DeployContext;

/// An external command-line tool a platform depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliTool {
    /// Executable name on the PATH
    pub binary: &'static str,
    /// npm package that provides it
    pub npm_package: &'static str,
}

impl CliTool {
    /// Describe a tool
    pub const fn new(binary: &'static str, npm_package: &'static str) -> Self {
        Self {
            binary,
            npm_package,
        }
    }
}

/// How a vendor CLI is invoked for the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CliInvocation {
    /// Call the binary from the PATH
    #[default]
    Global,
    /// Fetch and run on demand with `npx <package>`
    Npx,
}

impl CliInvocation {
    /// Build a command line invoking `tool` with `args`
    pub fn command(&self, tool: &CliTool, args: &[&str]) -> CommandLine {
        match self {
            Self::Global => CommandLine::new(tool.binary).args(args.iter().copied()),
            Self::Npx => CommandLine::new("npx")
                .arg(tool.npm_package)
                .args(args.iter().copied()),
        }
    }
}

/// Install a CLI tool globally with npm.
///
/// Returns `Global` on success, `Npx` when installation failed and the
/// fallback is allowed, `None` otherwise.
pub fn install_cli(ctx: &DeployContext<'_>, tool: &CliTool) -> Option<CliInvocation> {
    ctx.step(format!("Installing {} CLI...", tool.binary));

    let command = CommandLine::new("npm").args(["install", "-g", tool.npm_package]);
    let output = ctx.run(&command, ExecMode::Capture);

    if output.success {
        info!(tool = tool.binary, "installed CLI globally");
        ctx.success(format!("{} installed successfully!", tool.binary));
        return Some(CliInvocation::Global);
    }

    warn!(tool = tool.binary, error = %output.failure_reason(), "global install failed");
    npx_fallback(ctx, tool)
}

/// Ensure a CLI tool is available, installing it or falling back to npx.
pub fn ensure_cli(ctx: &DeployContext<'_>, tool: &CliTool) -> Option<CliInvocation> {
    if ctx.executor.is_installed(tool.binary) {
        return Some(CliInvocation::Global);
    }

    if ctx.config.install.global {
        return install_cli(ctx, tool);
    }

    npx_fallback(ctx, tool)
}

fn npx_fallback(ctx: &DeployContext<'_>, tool: &CliTool) -> Option<CliInvocation> {
    if ctx.config.install.allow_npx {
        ctx.warn(format!(
            "{} CLI not installed globally, will use npx {}",
            tool.binary, tool.npm_package
        ));
        Some(CliInvocation::Npx)
    } else {
        ctx.error(format!(
            "{} CLI is not installed. Install it with 'npm install -g {}'.",
            tool.binary, tool.npm_package
        ));
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::TestHarness;
    use deployease_core::ExecOutput;

    const TOOL: CliTool = CliTool::new("netlify", "netlify-cli");

    #[test]
    fn test_invocation_commands() {
        assert_eq!(
            CliInvocation::Global.command(&TOOL, &["deploy", "--prod"]).to_string(),
            "netlify deploy --prod"
        );
        assert_eq!(
            CliInvocation::Npx.command(&TOOL, &["deploy", "--prod"]).to_string(),
            "npx netlify-cli deploy --prod"
        );
    }

    #[test]
    fn test_installed_tool_is_used_globally() {
        let harness = TestHarness::new().executor(|e| e.with_installed("netlify"));
        let ctx = harness.context();

        assert_eq!(ensure_cli(&ctx, &TOOL), Some(CliInvocation::Global));
        assert!(harness.executor.calls().is_empty());
    }

    #[test]
    fn test_missing_tool_is_installed() {
        let harness = TestHarness::new();
        let ctx = harness.context();

        assert_eq!(ensure_cli(&ctx, &TOOL), Some(CliInvocation::Global));
        assert_eq!(harness.executor.calls(), vec!["npm install -g netlify-cli"]);
    }

    #[test]
    fn test_failed_install_falls_back_to_npx() {
        let harness = TestHarness::new()
            .executor(|e| e.respond("npm install", ExecOutput::failed("EACCES")));
        let ctx = harness.context();

        assert_eq!(ensure_cli(&ctx, &TOOL), Some(CliInvocation::Npx));
    }

    #[test]
    fn test_no_fallback_when_disabled() {
        let harness = TestHarness::new().config(|c| {
            c.install.global = false;
            c.install.allow_npx = false;
        });
        let ctx = harness.context();

        assert_eq!(ensure_cli(&ctx, &TOOL), None);
        assert!(harness.executor.calls().is_empty());
        assert!(harness.reporter.contains("npm install -g netlify-cli"));
    }
}
