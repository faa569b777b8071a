//! Railway

use deployease_core::error::Result;
use deployease_core::{AuthenticationResult, ExecMode, StageResult};

use crate::authenticator::{self, CliAuth};
use crate::context::{DeployContext, DeployPlan};
use crate::id::PlatformId;
use crate::installer::CliTool;
use crate::traits::Platform;

const AUTH: CliAuth = CliAuth::new(
    CliTool::new("railway", "@railway/cli"),
    &["whoami"],
    &["login"],
);

/// Railway, driven through `@railway/cli`
#[derive(Debug, Default)]
pub struct RailwayPlatform;

impl RailwayPlatform {
    /// Create a new Railway platform
    pub fn new() -> Self {
        Self
    }
}

impl Platform for RailwayPlatform {
    fn name(&self) -> &'static str {
        PlatformId::Railway.display_name()
    }

    fn id(&self) -> Option<PlatformId> {
        Some(PlatformId::Railway)
    }

    fn authenticate(
        &self,
        ctx: &DeployContext<'_>,
        plan: &mut DeployPlan,
    ) -> Result<AuthenticationResult> {
        Ok(authenticator::authenticate(ctx, plan, &AUTH))
    }

    /// Link the directory to a Railway project when it is not linked yet
    fn configure(&self, ctx: &DeployContext<'_>, plan: &mut DeployPlan) -> Result<StageResult> {
        if ctx.path("railway.json").is_file() {
            return Ok(StageResult::ok());
        }

        let status = ctx.run(&plan.command(&AUTH.tool, &["status"]), ExecMode::Capture);
        if status.success {
            return Ok(StageResult::ok());
        }

        let link = ctx
            .prompt
            .confirm("This directory is not linked to a Railway project. Link it now?", true)?;
        if !link {
            ctx.warn("Continuing without linking; 'railway up' will ask which project to use.");
            return Ok(StageResult::ok());
        }

        let linked = ctx.run(&plan.command(&AUTH.tool, &["link"]), ExecMode::Interactive);
        if !linked.success {
            let message = format!("Failed to link Railway project: {}", linked.failure_reason());
            ctx.error(&message);
            return Ok(StageResult::failed(message));
        }
        ctx.success("Linked Railway project");
        Ok(StageResult::ok())
    }

    fn deploy(&self, ctx: &DeployContext<'_>, plan: &DeployPlan) -> Result<StageResult> {
        let command = plan.command(&AUTH.tool, &["up"]);
        ctx.step(format!("Running: {}", command));

        // Attached to the terminal, so the exit status is all there is
        let output = ctx.run(&command, ExecMode::Interactive);
        if !output.success {
            let reason = output.failure_reason();
            ctx.error(format!("Railway deployment failed: {}", reason));
            return Ok(StageResult::failed(reason));
        }

        ctx.success("Railway deployment finished");
        Ok(StageResult::ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::TestHarness;
    use deployease_core::ExecOutput;

    #[test]
    fn test_configure_skips_when_project_file_present() {
        let harness = TestHarness::new();
        harness.write("railway.json", "{}");

        let result = RailwayPlatform::new()
            .configure(&harness.context(), &mut DeployPlan::new())
            .unwrap();

        assert!(result.success);
        assert!(harness.executor.calls().is_empty());
    }

    #[test]
    fn test_configure_links_unlinked_directory() {
        let harness = TestHarness::new()
            .answers(["y"])
            .executor(|e| e.respond("railway status", ExecOutput::failed("No linked project")));

        let result = RailwayPlatform::new()
            .configure(&harness.context(), &mut DeployPlan::new())
            .unwrap();

        assert!(result.success);
        assert_eq!(
            harness.executor.calls_with_mode(),
            vec![
                ("railway status".to_string(), ExecMode::Capture),
                ("railway link".to_string(), ExecMode::Interactive),
            ]
        );
    }

    #[test]
    fn test_configure_linked_directory_asks_nothing() {
        let harness = TestHarness::new();

        let result = RailwayPlatform::new()
            .configure(&harness.context(), &mut DeployPlan::new())
            .unwrap();

        assert!(result.success);
        assert!(harness.prompt.asked().is_empty());
    }

    #[test]
    fn test_full_run_with_npx() {
        let harness = TestHarness::new()
            .config(|c| c.install.global = false)
            .executor(|e| e.with_installed("npx"));
        harness.write("railway.json", "{}");

        let result = RailwayPlatform::new().run(&harness.context());

        assert!(result.success);
        assert!(result.url.is_none());
        assert_eq!(
            harness.executor.calls(),
            vec!["npx @railway/cli whoami", "npx @railway/cli up"]
        );
    }

    #[test]
    fn test_deploy_failure() {
        let harness = TestHarness::new()
            .executor(|e| e.respond("railway up", ExecOutput::failed("'railway up' exited with exit status: 1")));

        let result = RailwayPlatform::new()
            .deploy(&harness.context(), &DeployPlan::new())
            .unwrap();

        assert!(!result.success);
    }
}
