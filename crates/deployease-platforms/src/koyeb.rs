//! Koyeb

use deployease_core::error::Result;
use deployease_core::{AuthenticationResult, ExecMode, StageResult};

use crate::authenticator::{self, CliAuth};
use crate::context::{DeployContext, DeployPlan};
use crate::id::PlatformId;
use crate::installer::CliTool;
use crate::traits::Platform;

const AUTH: CliAuth = CliAuth::new(
    CliTool::new("koyeb", "koyeb"),
    &["organization", "list"],
    &["login"],
);

/// Koyeb, driven through the `koyeb` CLI
#[derive(Debug, Default)]
pub struct KoyebPlatform;

impl KoyebPlatform {
    /// Create a new Koyeb platform
    pub fn new() -> Self {
        Self
    }
}

impl Platform for KoyebPlatform {
    fn name(&self) -> &'static str {
        PlatformId::Koyeb.display_name()
    }

    fn id(&self) -> Option<PlatformId> {
        Some(PlatformId::Koyeb)
    }

    fn authenticate(
        &self,
        ctx: &DeployContext<'_>,
        plan: &mut DeployPlan,
    ) -> Result<AuthenticationResult> {
        Ok(authenticator::authenticate(ctx, plan, &AUTH))
    }

    fn deploy(&self, ctx: &DeployContext<'_>, plan: &DeployPlan) -> Result<StageResult> {
        let command = plan.command(&AUTH.tool, &["service", "deploy"]);
        ctx.step(format!("Running: {}", command));

        let output = ctx.run(&command, ExecMode::Interactive);
        if !output.success {
            let reason = output.failure_reason();
            ctx.error(format!("Koyeb deployment failed: {}", reason));
            return Ok(StageResult::failed(reason));
        }

        ctx.success("Koyeb deployment finished");
        Ok(StageResult::ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::TestHarness;
    use deployease_core::ExecOutput;

    #[test]
    fn test_detects_both_yaml_extensions() {
        for marker in ["koyeb.yaml", "koyeb.yml"] {
            let harness = TestHarness::new();
            harness.write(marker, "app: demo\n");
            assert!(KoyebPlatform::new().detect(harness.root()).unwrap());
        }
    }

    #[test]
    fn test_full_run() {
        let harness = TestHarness::new().executor(|e| e.with_installed("koyeb"));

        let result = KoyebPlatform::new().run(&harness.context());

        assert!(result.success);
        assert_eq!(
            harness.executor.calls_with_mode(),
            vec![
                ("koyeb organization list".to_string(), ExecMode::Capture),
                ("koyeb service deploy".to_string(), ExecMode::Interactive),
            ]
        );
    }

    #[test]
    fn test_rejected_session_stops_run() {
        let harness = TestHarness::new().executor(|e| {
            e.with_installed("koyeb")
                .respond("koyeb organization list", ExecOutput::failed("401"))
                .respond("koyeb login", ExecOutput::failed("cancelled"))
        });

        let result = KoyebPlatform::new().run(&harness.context());

        assert_eq!(result.error_message(), Some("Authentication failed"));
        assert!(!harness.executor.was_called("koyeb service"));
    }
}
