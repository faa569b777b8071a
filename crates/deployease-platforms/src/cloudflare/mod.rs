//! Cloudflare Workers and Pages
//!
//! One platform covers both products. `configure` decides which one a run
//! targets from `wrangler.toml` and the user's answers, and records the
//! choice as the plan's [`DeployMode`].

mod wrangler;

pub use wrangler::{read_main, write_basic, BasicManifest, WRANGLER_TOML};

use deployease_core::error::Result;
use deployease_core::{AuthenticationResult, ExecMode, StageResult};
use tracing::info;

use crate::authenticator::{self, CliAuth};
use crate::context::{DeployContext, DeployMode, DeployPlan};
use crate::id::PlatformId;
use crate::installer::CliTool;
use crate::output::deployed_url;
use crate::publish::configure_publish_dir;
use crate::traits::Platform;

const AUTH: CliAuth = CliAuth::new(
    CliTool::new("wrangler", "wrangler"),
    &["whoami"],
    &["login"],
);

/// Cloudflare, driven through `wrangler`
#[derive(Debug, Default)]
pub struct CloudflarePlatform;

impl CloudflarePlatform {
    /// Create a new Cloudflare platform
    pub fn new() -> Self {
        Self
    }

    fn build_required(ctx: &DeployContext<'_>, entry: &str) -> StageResult {
        ctx.error(format!(
            "Please build your project first. Expected file: {}",
            entry
        ));
        StageResult::failed(format!("Build required: missing {}", entry))
    }

    fn use_worker(ctx: &DeployContext<'_>, plan: &mut DeployPlan, entry: String) -> StageResult {
        info!(entry = %entry, "deploying as a Worker");
        ctx.info(format!("Will deploy Cloudflare Workers using entry {}", entry));
        plan.deploy_mode = Some(DeployMode::Worker);
        plan.entry_point = Some(entry);
        StageResult::ok()
    }

    fn configure_existing(
        ctx: &DeployContext<'_>,
        plan: &mut DeployPlan,
        main: Option<String>,
    ) -> Result<StageResult> {
        let manifest_path = ctx.path(WRANGLER_TOML);

        if let Some(entry) = main {
            if ctx.path(&entry).exists() {
                return Ok(Self::use_worker(ctx, plan, entry));
            }

            let default_entry = ctx.config.cloudflare.default_entry.as_str();
            let rewrite = ctx.prompt.confirm(
                &format!(
                    "Wrangler entry point is missing. Do you want to create/update a basic wrangler.toml (main -> {})?",
                    default_entry
                ),
                false,
            )?;
            if rewrite {
                write_basic(
                    &manifest_path,
                    &BasicManifest::new(&ctx.config.cloudflare, default_entry),
                )?;
                ctx.success(format!("Updated wrangler.toml with main = {}", default_entry));
            }
            return Ok(Self::build_required(ctx, &entry));
        }

        let workers = ctx.prompt.confirm(
            "wrangler.toml exists but has no \"main\" field. Deploy to Workers instead of Pages?",
            false,
        )?;
        if !workers {
            return Self::configure_pages(ctx, plan);
        }

        let entry = ctx.prompt.ask(
            "Enter the Workers entry point file:",
            &ctx.config.cloudflare.default_entry,
        )?;
        write_basic(
            &manifest_path,
            &BasicManifest::new(&ctx.config.cloudflare, &entry),
        )?;

        if !ctx.path(&entry).exists() {
            return Ok(Self::build_required(ctx, &entry));
        }
        Ok(Self::use_worker(ctx, plan, entry))
    }

    fn configure_new(ctx: &DeployContext<'_>, plan: &mut DeployPlan) -> Result<StageResult> {
        let workers = ctx
            .prompt
            .confirm("Do you want to deploy to Cloudflare Workers?", false)?;
        if !workers {
            return Self::configure_pages(ctx, plan);
        }

        let entry = ctx.config.cloudflare.default_entry.clone();
        let create = ctx.prompt.confirm(
            &format!(
                "No wrangler.toml found. Create a basic one (main -> {})?",
                entry
            ),
            true,
        )?;
        if create {
            write_basic(
                &ctx.path(WRANGLER_TOML),
                &BasicManifest::new(&ctx.config.cloudflare, &entry),
            )?;
            ctx.success("Created wrangler.toml!");
        }

        if !ctx.path(&entry).exists() {
            return Ok(Self::build_required(ctx, &entry));
        }
        Ok(Self::use_worker(ctx, plan, entry))
    }

    fn configure_pages(ctx: &DeployContext<'_>, plan: &mut DeployPlan) -> Result<StageResult> {
        let result = configure_publish_dir(ctx, plan)?;
        if !result.success {
            return Ok(result);
        }

        let project_name = ctx.prompt.ask(
            "Enter the Cloudflare Pages project name to use for deployment (project will be created if missing):",
            &ctx.config.cloudflare.project_name,
        )?;

        ctx.info(format!(
            "Will deploy Cloudflare Pages from '{}' (project: {})",
            plan.publish_dir.as_deref().unwrap_or_default(),
            project_name
        ));
        plan.project_name = Some(project_name);
        plan.deploy_mode = Some(DeployMode::Pages);
        Ok(StageResult::ok())
    }
}

impl Platform for CloudflarePlatform {
    fn name(&self) -> &'static str {
        PlatformId::Cloudflare.display_name()
    }

    fn id(&self) -> Option<PlatformId> {
        Some(PlatformId::Cloudflare)
    }

    fn authenticate(
        &self,
        ctx: &DeployContext<'_>,
        plan: &mut DeployPlan,
    ) -> Result<AuthenticationResult> {
        Ok(authenticator::authenticate(ctx, plan, &AUTH))
    }

    fn configure(&self, ctx: &DeployContext<'_>, plan: &mut DeployPlan) -> Result<StageResult> {
        let manifest_path = ctx.path(WRANGLER_TOML);
        if manifest_path.exists() {
            let main = read_main(&manifest_path)?;
            Self::configure_existing(ctx, plan, main)
        } else {
            Self::configure_new(ctx, plan)
        }
    }

    fn deploy(&self, ctx: &DeployContext<'_>, plan: &DeployPlan) -> Result<StageResult> {
        let (product, command) = match plan.deploy_mode {
            Some(DeployMode::Worker) => ("Workers", plan.command(&AUTH.tool, &["deploy"])),
            Some(DeployMode::Pages) => {
                let Some(dir) = plan.publish_dir.as_deref() else {
                    return Ok(StageResult::failed("publish directory missing"));
                };
                let project = plan
                    .project_name
                    .as_deref()
                    .unwrap_or(&ctx.config.cloudflare.project_name);
                (
                    "Pages",
                    plan.command(
                        &AUTH.tool,
                        &["pages", "deploy", dir, "--project-name", project],
                    ),
                )
            }
            None => {
                ctx.error("Deploy error: deployment mode not configured (workers/pages)");
                return Ok(StageResult::failed("not configured"));
            }
        };

        ctx.step(format!("Deploying to Cloudflare {}...", product));
        let output = ctx.run(&command, ExecMode::Stream);
        if !output.success {
            let reason = output.failure_reason();
            ctx.error(format!("Cloudflare {} deployment failed: {}", product, reason));
            return Ok(StageResult::failed(reason));
        }

        ctx.success(format!("Cloudflare {} deployed successfully", product));
        Ok(StageResult::ok().with_url(deployed_url(&output)))
    }
}
