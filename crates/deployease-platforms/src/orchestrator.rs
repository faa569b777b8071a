//! Choosing a platform and running it

use std::sync::Arc;

use deployease_core::error::Result;
use deployease_core::PlatformError;
use serde::Serialize;
use tracing::{info, instrument};

use crate::context::DeployContext;
use crate::registry::PlatformRegistry;
use crate::traits::Platform;

/// Result of a deployment attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployOutcome {
    /// Platform that ran
    pub platform: String,
    /// Whether every stage succeeded
    pub success: bool,
    /// URL reported by the platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Failure reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Pick the platform to deploy to.
///
/// An explicit name (flag or config) wins, then marker detection, then a
/// menu of every registered platform.
pub fn choose_platform(
    registry: &PlatformRegistry,
    ctx: &DeployContext<'_>,
    requested: Option<&str>,
) -> Result<Arc<dyn Platform>> {
    if let Some(name) = requested {
        let platform = registry
            .get_by_name(name)
            .ok_or_else(|| PlatformError::NotFound(name.to_string()))?;
        info!(requested = name, platform = platform.name(), "using requested platform");
        return Ok(platform);
    }

    if let Some(platform) = registry.detect(ctx.root) {
        ctx.success(format!("Detected platform: {}", platform.name()));
        return Ok(platform);
    }

    ctx.info("No platform detected. Please select manually:");
    let names: Vec<String> = registry.names().into_iter().map(String::from).collect();
    let selected = ctx.prompt.select("Choose platform:", &names)?;

    registry
        .get_by_name(&selected)
        .ok_or_else(|| PlatformError::NotFound(selected).into())
}

/// Choose a platform and run its full lifecycle
#[instrument(skip_all)]
pub fn deploy(
    registry: &PlatformRegistry,
    ctx: &DeployContext<'_>,
    requested: Option<&str>,
) -> Result<DeployOutcome> {
    ctx.info("DeployEase - Starting deployment...");
    let platform = choose_platform(registry, ctx, requested)?;

    let result = platform.run(ctx);
    if result.success {
        ctx.success(format!("Successfully deployed to {}!", platform.name()));
        if let Some(url) = &result.url {
            ctx.info(format!("URL: {}", url));
        }
    } else {
        ctx.error(format!(
            "Deployment failed: {}",
            result.error_message().unwrap_or("unknown error")
        ));
    }

    Ok(DeployOutcome {
        platform: platform.name().to_string(),
        success: result.success,
        url: result.url,
        error: result.error,
    })
}
