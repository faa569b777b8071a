//! Netlify

use deployease_core::error::Result;
use deployease_core::{AuthenticationResult, ExecMode, StageResult};

use crate::authenticator::{self, CliAuth};
use crate::context::{DeployContext, DeployPlan};
use crate::id::PlatformId;
use crate::installer::CliTool;
use crate::output::deployed_url;
use crate::publish::configure_publish_dir;
use crate::traits::Platform;

const AUTH: CliAuth = CliAuth::new(
    CliTool::new("netlify", "netlify-cli"),
    &["status"],
    &["login"],
);

/// Netlify, driven through `netlify-cli`
#[derive(Debug, Default)]
pub struct NetlifyPlatform;

impl NetlifyPlatform {
    /// Create a new Netlify platform
    pub fn new() -> Self {
        Self
    }
}

impl Platform for NetlifyPlatform {
    fn name(&self) -> &'static str {
        PlatformId::Netlify.display_name()
    }

    fn id(&self) -> Option<PlatformId> {
        Some(PlatformId::Netlify)
    }

    fn authenticate(
        &self,
        ctx: &DeployContext<'_>,
        plan: &mut DeployPlan,
    ) -> Result<AuthenticationResult> {
        Ok(authenticator::authenticate(ctx, plan, &AUTH))
    }

    fn configure(&self, ctx: &DeployContext<'_>, plan: &mut DeployPlan) -> Result<StageResult> {
        configure_publish_dir(ctx, plan)
    }

    fn deploy(&self, ctx: &DeployContext<'_>, plan: &DeployPlan) -> Result<StageResult> {
        ctx.step("Deploying to Netlify...");

        let mut args = vec!["deploy", "--prod"];
        if let Some(dir) = plan.publish_dir.as_deref() {
            args.extend(["--dir", dir]);
        }

        let output = ctx.run(&plan.command(&AUTH.tool, &args), ExecMode::Stream);
        if !output.success {
            let reason = output.failure_reason();
            ctx.error(format!("Netlify deploy failed: {}", reason));
            return Ok(StageResult::failed(reason));
        }

        let url = deployed_url(&output);
        match &url {
            Some(url) => ctx.success(format!("Netlify deploy completed: {}", url)),
            None => ctx.success("Netlify deploy completed"),
        }
        Ok(StageResult::ok().with_url(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::TestHarness;
    use deployease_core::ExecOutput;

    #[test]
    fn test_detects_netlify_toml() {
        let harness = TestHarness::new();
        assert!(!NetlifyPlatform::new().detect(harness.root()).unwrap());

        harness.write("netlify.toml", "[build]\npublish = \"dist\"\n");
        assert!(NetlifyPlatform::new().detect(harness.root()).unwrap());
    }

    #[test]
    fn test_full_run_deploys_chosen_dir() {
        let harness = TestHarness::new()
            .answers([""])
            .executor(|e| {
                e.with_installed("netlify").respond(
                    "netlify deploy",
                    ExecOutput::ok("Website URL: https://my-site.netlify.app"),
                )
            });
        harness.write("dist/index.html", "<h1>hi</h1>");

        let result = NetlifyPlatform::new().run(&harness.context());

        assert!(result.success, "{:?}", result);
        assert_eq!(result.url.as_deref(), Some("https://my-site.netlify.app"));
        assert_eq!(
            harness.executor.calls(),
            vec!["netlify status", "netlify deploy --prod --dir ./dist"]
        );
    }

    #[test]
    fn test_missing_publish_dir_stops_before_build_and_deploy() {
        let harness = TestHarness::new()
            .answers([""])
            .executor(|e| e.with_installed("netlify"));
        harness.write("package.json", r#"{"scripts": {"build": "vite build"}}"#);

        let result = NetlifyPlatform::new().run(&harness.context());

        assert!(!result.success);
        assert!(result.error_message().unwrap().contains("does not exist"));
        assert!(!harness.executor.was_called("npm run build"));
        assert!(!harness.executor.was_called("netlify deploy"));
    }

    #[test]
    fn test_deploy_failure() {
        let harness = TestHarness::new().executor(|e| {
            e.respond("netlify deploy", ExecOutput::failed("Site not found"))
        });
        let plan = DeployPlan {
            publish_dir: Some("./public".to_string()),
            ..Default::default()
        };

        let result = NetlifyPlatform::new().deploy(&harness.context(), &plan).unwrap();
        assert!(!result.success);
        assert_eq!(result.error_message(), Some("Site not found"));
    }
}
