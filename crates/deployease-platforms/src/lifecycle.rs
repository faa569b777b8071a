//! Run lifecycle: authenticate, configure, build, deploy

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use deployease_core::error::Result;
use deployease_core::{Stage, StageResult};
use tracing::{debug, error, info, instrument, warn};

use crate::context::{DeployContext, DeployPlan};
use crate::traits::Platform;

/// Error text returned when the authenticate stage rejects the session
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";

/// Drive `platform` through its stages.
///
/// Stops at the first failed stage and returns its result. Errors and panics
/// raised by a stage are logged and become a failed result; nothing escapes.
#[instrument(skip_all, fields(platform = platform.name()))]
pub fn run<P: Platform + ?Sized>(platform: &P, ctx: &DeployContext<'_>) -> StageResult {
    let start = Instant::now();
    ctx.info(format!("Starting deployment to {}...", platform.name()));

    let result = match panic::catch_unwind(AssertUnwindSafe(|| run_stages(platform, ctx))) {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            error!(error = %e, "deployment flow error");
            ctx.error(format!("Deployment flow error: {}", e));
            StageResult::failed(e.to_string())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(panic = %message, "deployment flow panicked");
            ctx.error(format!("Deployment flow error: {}", message));
            StageResult::failed(message)
        }
    };

    info!(
        success = result.success,
        duration_ms = start.elapsed().as_millis() as u64,
        "deployment flow finished"
    );
    result
}

fn run_stages<P: Platform + ?Sized>(platform: &P, ctx: &DeployContext<'_>) -> Result<StageResult> {
    let mut plan = DeployPlan::new();

    debug!(stage = %Stage::Authenticate, "entering stage");
    let auth = platform.authenticate(ctx, &mut plan)?;
    if !auth.authenticated {
        warn!(reason = %auth.error, "authentication rejected");
        return Ok(StageResult::failed(AUTHENTICATION_FAILED));
    }

    debug!(stage = %Stage::Configure, "entering stage");
    let configured = platform.configure(ctx, &mut plan)?;
    if !configured.success {
        return Ok(stage_failed(Stage::Configure, configured));
    }

    debug!(stage = %Stage::Build, "entering stage");
    let built = platform.build(ctx, &plan)?;
    if !built.success {
        return Ok(stage_failed(Stage::Build, built));
    }

    debug!(stage = %Stage::Deploy, "entering stage");
    let deployed = platform.deploy(ctx, &plan)?;
    if !deployed.success {
        return Ok(stage_failed(Stage::Deploy, deployed));
    }
    Ok(deployed)
}

fn stage_failed(stage: Stage, result: StageResult) -> StageResult {
    warn!(%stage, error = result.error_message().unwrap_or_default(), "stage failed");
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}
