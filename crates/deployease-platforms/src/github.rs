//! GitHub Pages via the `gh-pages` npm package

use deployease_core::error::Result;
use deployease_core::{AuthenticationResult, CommandLine, ExecMode, StageResult};
use tracing::{debug, warn};

use crate::context::{DeployContext, DeployPlan};
use crate::id::PlatformId;
use crate::manifest::PackageManifest;
use crate::traits::Platform;

const GH_PAGES: &str = "gh-pages";

/// GitHub Pages, published by a `deploy` npm script that runs `gh-pages`
#[derive(Debug, Default)]
pub struct GitHubPagesPlatform;

impl GitHubPagesPlatform {
    /// Create a new GitHub Pages platform
    pub fn new() -> Self {
        Self
    }
}

impl Platform for GitHubPagesPlatform {
    fn name(&self) -> &'static str {
        PlatformId::GitHubPages.display_name()
    }

    fn id(&self) -> Option<PlatformId> {
        Some(PlatformId::GitHubPages)
    }

    // git credentials are the user's own; nothing to check
    fn authenticate(
        &self,
        _ctx: &DeployContext<'_>,
        _plan: &mut DeployPlan,
    ) -> Result<AuthenticationResult> {
        Ok(AuthenticationResult::authenticated())
    }

    fn configure(&self, ctx: &DeployContext<'_>, plan: &mut DeployPlan) -> Result<StageResult> {
        let dir = ctx
            .prompt
            .ask("Enter build directory to publish", "build")?;
        let dir = if dir.trim().is_empty() {
            "build".to_string()
        } else {
            dir.trim().to_string()
        };

        if !ctx.path("node_modules").join(GH_PAGES).exists() {
            ctx.step("Installing gh-pages...");
            let output = ctx.run(
                &CommandLine::new("npm").args(["install", GH_PAGES]),
                ExecMode::Stream,
            );
            if !output.success {
                let message = format!("Failed to install gh-pages: {}", output.failure_reason());
                ctx.error(&message);
                return Ok(StageResult::failed(message));
            }
        }

        let manifest_path = ctx.path("package.json");
        if !manifest_path.is_file() {
            let message = "package.json not found, cannot add deploy script";
            ctx.error(message);
            return Ok(StageResult::failed(message));
        }

        let mut manifest = PackageManifest::load(&manifest_path)?;
        match manifest.script("deploy").map(str::to_string) {
            None => {
                ctx.step("Adding deploy script to package.json...");
                manifest.set_script("deploy", &format!("gh-pages -d {}", dir));
                manifest.save(&manifest_path)?;
                debug!(dir = %dir, "added deploy script");
            }
            Some(script) if !script.contains(dir.as_str()) => {
                warn!(script = %script, dir = %dir, "deploy script does not reference build directory");
                ctx.warn("Existing deploy script does not reference the chosen build directory, leaving it unchanged");
            }
            Some(_) => {}
        }

        plan.publish_dir = Some(dir);
        Ok(StageResult::ok())
    }

    fn deploy(&self, ctx: &DeployContext<'_>, _plan: &DeployPlan) -> Result<StageResult> {
        ctx.step("Deploying to GitHub Pages (npm run deploy)...");

        let output = ctx.run(
            &CommandLine::new("npm").args(["run", "deploy"]),
            ExecMode::Stream,
        );
        if !output.success {
            let reason = output.failure_reason();
            ctx.error(format!("Deployment failed: {}", reason));
            return Ok(StageResult::failed(reason));
        }

        ctx.success("Successfully deployed to GitHub Pages!");
        Ok(StageResult::ok())
    }
}
