//! Shared vendor CLI authentication
//!
//! Every CLI-backed platform authenticates the same way: make sure the CLI
//! is usable, probe for an existing session, and if there is none hand the
//! terminal to the vendor's login flow once before probing again.

use deployease_core::{AuthenticationResult, ExecMode};
use tracing::{info, warn};

use crate::context::{DeployContext, DeployPlan};
use crate::installer::{ensure_cli, CliTool};

/// How a vendor CLI reports and establishes a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliAuth {
    /// The CLI
    pub tool: CliTool,
    /// Arguments of a command that succeeds only when logged in
    pub probe: &'static [&'static str],
    /// Arguments of the interactive login command
    pub login: &'static [&'static str],
}

impl CliAuth {
    /// Describe a CLI's authentication commands
    pub const fn new(
        tool: CliTool,
        probe: &'static [&'static str],
        login: &'static [&'static str],
    ) -> Self {
        Self { tool, probe, login }
    }
}

/// Authenticate against a vendor CLI, recording the invocation on the plan
pub fn authenticate(
    ctx: &DeployContext<'_>,
    plan: &mut DeployPlan,
    auth: &CliAuth,
) -> AuthenticationResult {
    let Some(invocation) = ensure_cli(ctx, &auth.tool) else {
        return AuthenticationResult::rejected(format!("{} CLI is not available", auth.tool.binary));
    };
    plan.cli = Some(invocation);

    let probe = plan.command(&auth.tool, auth.probe);
    if ctx.run(&probe, ExecMode::Capture).success {
        info!(tool = auth.tool.binary, "existing session found");
        return AuthenticationResult::authenticated();
    }

    ctx.info(format!(
        "You are not logged into {}. Logging in now...",
        auth.tool.binary
    ));
    let login = plan.command(&auth.tool, auth.login);
    let login_output = ctx.run(&login, ExecMode::Interactive);

    if login_output.success && ctx.run(&probe, ExecMode::Capture).success {
        ctx.success(format!("Logged into {} successfully!", auth.tool.binary));
        return AuthenticationResult::authenticated();
    }

    warn!(tool = auth.tool.binary, error = %login_output.failure_reason(), "login failed");
    let message = format!(
        "Failed to log into {}. Please log in manually using '{}'.",
        auth.tool.binary, login
    );
    ctx.error(&message);
    AuthenticationResult::rejected(message)
}
