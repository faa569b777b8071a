//! Render
//!
//! Render has no CLI step here: it builds whatever lands on the connected
//! branch. Deploying means committing pending work and pushing the branch.

use deployease_core::error::Result;
use deployease_core::{AuthenticationResult, CommandLine, ExecMode, ExecOutput, StageResult};
use tracing::{debug, info};

use crate::context::{DeployContext, DeployPlan};
use crate::id::PlatformId;
use crate::traits::Platform;

/// Where build status is shown after a push
pub const DASHBOARD_URL: &str = "https://dashboard.render.com";

/// Render, deployed by pushing to the connected git remote
#[derive(Debug, Default)]
pub struct RenderPlatform;

impl RenderPlatform {
    /// Create a new Render platform
    pub fn new() -> Self {
        Self
    }
}

fn git(ctx: &DeployContext<'_>, args: &[&str], mode: ExecMode) -> ExecOutput {
    ctx.run(&CommandLine::new("git").args(args.iter().copied()), mode)
}

fn abort(ctx: &DeployContext<'_>, message: &str, error: &str) -> StageResult {
    ctx.error(message);
    StageResult::failed(error)
}

impl Platform for RenderPlatform {
    fn name(&self) -> &'static str {
        PlatformId::Render.display_name()
    }

    fn id(&self) -> Option<PlatformId> {
        Some(PlatformId::Render)
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
        let has_blueprint = PlatformId::Render
            .markers()
            .iter()
            .any(|marker| ctx.path(marker).is_file());

        if !has_blueprint {
            ctx.info("No render.yaml found in repository. To use Render, create a render.yaml or connect the repository via the Render dashboard.");
            ctx.info(format!(
                "Quick setup: create a new Web Service at {}, connect your Git provider, then select this repository and branch.",
                DASHBOARD_URL
            ));
            let connected = ctx.prompt.confirm(
                "Have you connected this repository to Render (via the dashboard)?",
                false,
            )?;
            if !connected {
                return Ok(abort(
                    ctx,
                    "Please connect your repository to Render first.",
                    "Repository not connected to Render",
                ));
            }
        }

        if !git(ctx, &["rev-parse", "--is-inside-work-tree"], ExecMode::Capture).success {
            ctx.info("Initialize one with 'git init', commit, then 'git remote add origin <url>'.");
            return Ok(abort(
                ctx,
                "This directory is not a git repository.",
                "Not a git repository",
            ));
        }

        let remote = ctx.config.git.remote.as_str();
        let url = git(ctx, &["remote", "get-url", remote], ExecMode::Capture);
        if !url.success || url.output.trim().is_empty() {
            ctx.info(format!(
                "Add it with 'git remote add {} <url>' or set git.remote in deployease.toml.",
                remote
            ));
            return Ok(abort(
                ctx,
                &format!("Git remote '{}' not found. Push your repository to GitHub (or another provider) first.", remote),
                &format!("Git remote '{}' not configured", remote),
            ));
        }
        debug!(remote, url = %url.output.trim(), "push target");

        let branch = git(ctx, &["branch", "--show-current"], ExecMode::Capture);
        if !branch.success {
            return Ok(abort(
                ctx,
                "Failed to determine current git branch",
                "Could not determine git branch",
            ));
        }
        let branch = branch.output.trim().to_string();
        if branch.is_empty() {
            return Ok(abort(
                ctx,
                "Could not determine current git branch. Please ensure you are on a branch (not in detached HEAD).",
                "No current branch",
            ));
        }
        debug!(branch = %branch, "current branch");

        let status = git(ctx, &["status", "--porcelain"], ExecMode::Capture);
        if status.success && !status.output.trim().is_empty() {
            ctx.warn("You have uncommitted changes in your working tree.");
            let commit = ctx.prompt.confirm(
                "Do you want to create a commit from these changes and continue?",
                true,
            )?;
            if !commit {
                return Ok(abort(
                    ctx,
                    "Aborting. Please commit or stash your changes and run this command again.",
                    "Uncommitted changes present",
                ));
            }

            ctx.step("Staging changes...");
            let added = git(ctx, &["add", "-A"], ExecMode::Capture);
            if !added.success {
                let message = format!("git add failed: {}", added.failure_reason());
                return Ok(abort(ctx, &message, "git add failed"));
            }

            ctx.step("Committing...");
            let message = ctx.config.git.commit_message.as_str();
            let committed = git(ctx, &["commit", "-m", message], ExecMode::Stream);
            if !committed.success {
                let message = format!("git commit failed: {}", committed.failure_reason());
                return Ok(abort(ctx, &message, "git commit failed"));
            }
            ctx.success("Changes committed successfully.");
        }

        ctx.info(format!("Ready to deploy branch '{}' to Render.", branch));
        plan.git_branch = Some(branch);
        Ok(StageResult::ok())
    }

    fn deploy(&self, ctx: &DeployContext<'_>, plan: &DeployPlan) -> Result<StageResult> {
        let branch = match plan.git_branch.clone() {
            Some(branch) => branch,
            None => {
                let output = git(ctx, &["branch", "--show-current"], ExecMode::Capture);
                output.output.trim().to_string()
            }
        };
        if branch.is_empty() {
            return Ok(abort(ctx, "No branch specified to push", "No branch to push"));
        }

        let remote = ctx.config.git.remote.as_str();
        ctx.step(format!("Pushing {} to {}...", branch, remote));
        let pushed = git(ctx, &["push", remote, branch.as_str()], ExecMode::Interactive);
        if !pushed.success {
            let reason = pushed.failure_reason();
            ctx.error(format!("git push failed: {}", reason));
            return Ok(StageResult::failed(reason));
        }

        info!(remote, branch = %branch, "pushed");
        ctx.success(format!("Pushed to {} successfully!", remote));
        ctx.info("Render will automatically deploy your changes");
        ctx.info(format!("View status at: {}", DASHBOARD_URL));
        Ok(StageResult::ok().with_url(Some(DASHBOARD_URL.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::context::tests::TestHarness;

    fn repo(harness: TestHarness) -> TestHarness {
        harness.executor(|e| {
            e.respond("git remote get-url origin", ExecOutput::ok("git@github.com:me/site.git"))
                .respond("git branch --show-current", ExecOutput::ok("main"))
        })
    }

    #[test]
    fn test_configure_clean_repo() {
        let harness = repo(TestHarness::new());
        harness.write("render.yaml", "services: []\n");
        let mut plan = DeployPlan::new();

        let result = RenderPlatform::new()
            .configure(&harness.context(), &mut plan)
            .unwrap();

        assert!(result.success);
        assert_eq!(plan.git_branch.as_deref(), Some("main"));
        assert!(harness.prompt.asked().is_empty());
        assert!(!harness.executor.was_called("git commit"));
    }

    #[test]
    fn test_unconnected_repo_aborts() {
        let harness = repo(TestHarness::new()).answers(["n"]);
        let mut plan = DeployPlan::new();

        let result = RenderPlatform::new()
            .configure(&harness.context(), &mut plan)
            .unwrap();

        assert_eq!(result.error_message(), Some("Repository not connected to Render"));
        assert!(harness.executor.calls().is_empty());
    }

    #[test]
    fn test_not_a_repository() {
        let harness = TestHarness::new().executor(|e| {
            e.respond("git rev-parse", ExecOutput::failed("fatal: not a git repository"))
        });
        harness.write("render.yml", "services: []\n");
        let mut plan = DeployPlan::new();

        let result = RenderPlatform::new()
            .configure(&harness.context(), &mut plan)
            .unwrap();

        assert_eq!(result.error_message(), Some("Not a git repository"));
    }

    #[test]
    fn test_missing_remote_and_detached_head() {
        let harness = TestHarness::new();
        harness.write("render.yaml", "");
        let result = RenderPlatform::new()
            .configure(&harness.context(), &mut DeployPlan::new())
            .unwrap();
        assert_eq!(result.error_message(), Some("Git remote 'origin' not configured"));

        let harness = TestHarness::new()
            .executor(|e| e.respond("git remote get-url origin", ExecOutput::ok("url")));
        harness.write("render.yaml", "");
        let result = RenderPlatform::new()
            .configure(&harness.context(), &mut DeployPlan::new())
            .unwrap();
        assert_eq!(result.error_message(), Some("No current branch"));
    }

    #[test]
    fn test_configured_remote_must_exist() {
        let harness = TestHarness::new()
            .config(|c| c.git.remote = "upstream".to_string())
            .executor(|e| {
                e.respond("git remote get-url origin", ExecOutput::ok("git@github.com:me/site.git"))
                    .respond(
                        "git remote get-url upstream",
                        ExecOutput::failed("error: No such remote 'upstream'"),
                    )
                    .respond("git branch --show-current", ExecOutput::ok("main"))
            });
        harness.write("render.yaml", "");

        let result = RenderPlatform::new()
            .configure(&harness.context(), &mut DeployPlan::new())
            .unwrap();

        assert_eq!(result.error_message(), Some("Git remote 'upstream' not configured"));
        assert!(harness.reporter.contains("git remote add upstream <url>"));
        assert!(!harness.executor.was_called("git branch"));
    }

    #[test]
    fn test_dirty_tree_is_committed() {
        let harness = repo(TestHarness::new())
            .answers(["y", ""])
            .executor(|e| e.respond("git status", ExecOutput::ok(" M index.html")));
        let mut plan = DeployPlan::new();

        let result = RenderPlatform::new()
            .configure(&harness.context(), &mut plan)
            .unwrap();

        assert!(result.success);
        assert!(harness.executor.was_called("git add -A"));
        assert!(harness
            .executor
            .was_called("git commit -m \"Deploy to Render via DeployEase\""));
    }

    #[test]
    fn test_dirty_tree_declined_aborts() {
        let harness = repo(TestHarness::new())
            .answers(["y", "n"])
            .executor(|e| e.respond("git status", ExecOutput::ok("?? notes.txt")));
        let mut plan = DeployPlan::new();

        let result = RenderPlatform::new()
            .configure(&harness.context(), &mut plan)
            .unwrap();

        assert_eq!(result.error_message(), Some("Uncommitted changes present"));
        assert!(!harness.executor.was_called("git add"));
    }

    #[test]
    fn test_deploy_pushes_branch() {
        let harness = TestHarness::new().config(|c| c.git.remote = "upstream".to_string());
        let plan = DeployPlan {
            git_branch: Some("release".to_string()),
            ..Default::default()
        };

        let result = RenderPlatform::new().deploy(&harness.context(), &plan).unwrap();

        assert!(result.success);
        assert_eq!(result.url.as_deref(), Some(DASHBOARD_URL));
        assert_eq!(
            harness.executor.calls_with_mode(),
            vec![("git push upstream release".to_string(), ExecMode::Interactive)]
        );
    }

    #[test]
    fn test_failed_push() {
        let harness = TestHarness::new()
            .executor(|e| e.respond("git push", ExecOutput::failed("rejected (non-fast-forward)")));
        let plan = DeployPlan {
            git_branch: Some("main".to_string()),
            ..Default::default()
        };

        let result = RenderPlatform::new().deploy(&harness.context(), &plan).unwrap();
        assert_eq!(result.error_message(), Some("rejected (non-fast-forward)"));
    }
}
