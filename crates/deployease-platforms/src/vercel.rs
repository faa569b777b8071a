//! Vercel

use deployease_core::error::Result;
use deployease_core::{AuthenticationResult, ExecMode, StageResult};
use tracing::debug;

use crate::authenticator::{self, CliAuth};
use crate::context::{DeployContext, DeployPlan};
use crate::id::PlatformId;
use crate::installer::CliTool;
use crate::output::deployed_url;
use crate::publish::configure_publish_dir;
use crate::traits::Platform;

const AUTH: CliAuth = CliAuth::new(CliTool::new("vercel", "vercel"), &["whoami"], &["login"]);

/// Written by `vercel link`
const PROJECT_LINK: &str = ".vercel/project.json";

/// Vercel, driven through the `vercel` CLI
#[derive(Debug, Default)]
pub struct VercelPlatform;

impl VercelPlatform {
    /// Create a new Vercel platform
    pub fn new() -> Self {
        Self
    }
}

impl Platform for VercelPlatform {
    fn name(&self) -> &'static str {
        PlatformId::Vercel.display_name()
    }

    fn id(&self) -> Option<PlatformId> {
        Some(PlatformId::Vercel)
    }

    fn authenticate(
        &self,
        ctx: &DeployContext<'_>,
        plan: &mut DeployPlan,
    ) -> Result<AuthenticationResult> {
        Ok(authenticator::authenticate(ctx, plan, &AUTH))
    }

    fn configure(&self, ctx: &DeployContext<'_>, plan: &mut DeployPlan) -> Result<StageResult> {
        if ctx.path(PROJECT_LINK).is_file() {
            debug!("project already linked");
            ctx.info("Project already linked to Vercel");
        } else {
            ctx.step("Linking project to Vercel...");
            let output = ctx.run(&plan.command(&AUTH.tool, &["link"]), ExecMode::Interactive);
            if !output.success {
                let message = format!(
                    "Failed to link project to Vercel: {}",
                    output.failure_reason()
                );
                ctx.error(&message);
                return Ok(StageResult::failed(message));
            }
            ctx.success("Project linked to Vercel");
        }

        configure_publish_dir(ctx, plan)
    }

    fn deploy(&self, ctx: &DeployContext<'_>, plan: &DeployPlan) -> Result<StageResult> {
        ctx.step("Deploying to Vercel...");

        // The CLI uploads the project and uses its own output settings
        let output = ctx.run(
            &plan.command(&AUTH.tool, &["deploy", "--prod"]),
            ExecMode::Stream,
        );
        if !output.success {
            let reason = output.failure_reason();
            ctx.error(format!("Vercel deploy failed: {}", reason));
            return Ok(StageResult::failed(reason));
        }

        let url = deployed_url(&output);
        match &url {
            Some(url) => ctx.success(format!("Vercel deploy completed: {}", url)),
            None => ctx.success("Vercel deploy completed"),
        }
        Ok(StageResult::ok().with_url(url))
    }
}
