//! Firebase Hosting

use std::path::Path;

use deployease_core::error::Result;
use deployease_core::{AuthenticationResult, ExecMode, PlatformError, StageResult};
use serde_json::json;
use tracing::info;

use crate::authenticator::{self, CliAuth};
use crate::context::{DeployContext, DeployPlan};
use crate::id::PlatformId;
use crate::installer::CliTool;
use crate::output::deployed_url;
use crate::traits::Platform;

const AUTH: CliAuth = CliAuth::new(
    CliTool::new("firebase", "firebase-tools"),
    &["projects:list"],
    &["login"],
);

const MANIFEST: &str = "firebase.json";

const PLACEHOLDER_PAGE: &str = "<h1>Firebase Hosting Setup</h1>";

/// Firebase Hosting, driven through `firebase-tools`
#[derive(Debug, Default)]
pub struct FirebasePlatform;

impl FirebasePlatform {
    /// Create a new Firebase platform
    pub fn new() -> Self {
        Self
    }
}

/// Hosting manifest serving `public_dir` as a single-page app
pub fn hosting_manifest(public_dir: &str) -> serde_json::Value {
    json!({
        "hosting": {
            "public": public_dir,
            "ignore": ["firebase.json", "**/.*", "**/node_modules/**"],
            "rewrites": [{ "source": "**", "destination": "/index.html" }]
        }
    })
}

fn write_manifest(path: &Path, public_dir: &str) -> Result<()> {
    let content = serde_json::to_string_pretty(&hosting_manifest(public_dir))?;
    std::fs::write(path, format!("{}\n", content)).map_err(|e| {
        PlatformError::ManifestUpdateError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn is_missing_or_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(true)
}

impl Platform for FirebasePlatform {
    fn name(&self) -> &'static str {
        PlatformId::Firebase.display_name()
    }

    fn id(&self) -> Option<PlatformId> {
        Some(PlatformId::Firebase)
    }

    fn authenticate(
        &self,
        ctx: &DeployContext<'_>,
        plan: &mut DeployPlan,
    ) -> Result<AuthenticationResult> {
        Ok(authenticator::authenticate(ctx, plan, &AUTH))
    }

    fn configure(&self, ctx: &DeployContext<'_>, plan: &mut DeployPlan) -> Result<StageResult> {
        let manifest_path = ctx.path(MANIFEST);
        if manifest_path.exists() {
            ctx.info("firebase.json already exists, skipping configuration");
            return Ok(StageResult::ok());
        }

        let project_id = ctx.prompt.ask("Enter your Firebase project ID:", "")?;
        let project_id = project_id.trim();
        if project_id.is_empty() {
            ctx.error("Firebase project ID is required.");
            return Ok(StageResult::failed("Firebase project ID is required."));
        }
        plan.project_name = Some(project_id.to_string());

        ctx.step("Initializing Firebase in the project...");
        let output = ctx.run(
            &plan.command(&AUTH.tool, &["use", "--add", project_id]),
            ExecMode::Interactive,
        );
        if !output.success {
            let message = format!(
                "Failed to run 'firebase use --add': {}",
                output.failure_reason()
            );
            ctx.error(&message);
            return Ok(StageResult::failed(message));
        }

        let public_dir = ctx.config.firebase.public_dir.as_str();
        write_manifest(&manifest_path, public_dir)?;
        info!(path = %manifest_path.display(), public_dir, "wrote hosting manifest");

        let public_path = ctx.path(public_dir);
        if is_missing_or_empty(&public_path) {
            std::fs::create_dir_all(&public_path)?;
            std::fs::write(public_path.join("index.html"), PLACEHOLDER_PAGE)?;
            ctx.info(format!("Created placeholder {}/index.html", public_dir));
        }

        plan.publish_dir = Some(public_dir.to_string());
        ctx.success("Firebase setup completed!");
        Ok(StageResult::ok())
    }

    fn deploy(&self, ctx: &DeployContext<'_>, plan: &DeployPlan) -> Result<StageResult> {
        ctx.step("Deploying to Firebase Hosting...");

        let output = ctx.run(
            &plan.command(&AUTH.tool, &["deploy", "--only", "hosting"]),
            ExecMode::Stream,
        );
        if !output.success {
            let reason = output.failure_reason();
            ctx.error(format!("Firebase deploy failed: {}", reason));
            return Ok(StageResult::failed(reason));
        }

        let url = deployed_url(&output);
        match &url {
            Some(url) => ctx.success(format!("Firebase deploy completed: {}", url)),
            None => ctx.success("Firebase deploy completed"),
        }
        Ok(StageResult::ok().with_url(url))
    }
}
