//! Hosting platform trait

use std::path::Path;

use deployease_core::error::Result;
use deployease_core::{AuthenticationResult, PlatformError, StageResult};

use crate::build::default_build;
use crate::context::{DeployContext, DeployPlan};
use crate::detector::markers_present;
use crate::id::PlatformId;
use crate::lifecycle;

/// Trait for hosting platforms
///
/// Implementations are stateless. Anything decided during a run is kept on
/// the [`DeployPlan`] that [`Platform::run`] creates, so one platform value
/// can be run any number of times.
pub trait Platform: Send + Sync {
    /// Display name (e.g., "Netlify", "GitHub Pages")
    fn name(&self) -> &'static str;

    /// Built-in platform identity, if any
    fn id(&self) -> Option<PlatformId> {
        None
    }

    /// Check whether the project at `root` is configured for this platform.
    ///
    /// Must not touch the filesystem beyond existence checks.
    fn detect(&self, root: &Path) -> Result<bool> {
        match self.id() {
            Some(id) => Ok(markers_present(root, id)),
            None => Err(PlatformError::not_implemented(self.name(), "detect").into()),
        }
    }

    /// Verify or establish a vendor session
    fn authenticate(
        &self,
        _ctx: &DeployContext<'_>,
        _plan: &mut DeployPlan,
    ) -> Result<AuthenticationResult> {
        Err(PlatformError::not_implemented(self.name(), "authenticate").into())
    }

    /// Resolve per-run choices and scaffold anything the deploy needs
    fn configure(&self, _ctx: &DeployContext<'_>, _plan: &mut DeployPlan) -> Result<StageResult> {
        Ok(StageResult::ok())
    }

    /// Build the project
    fn build(&self, ctx: &DeployContext<'_>, _plan: &DeployPlan) -> Result<StageResult> {
        Ok(default_build(ctx))
    }

    /// Hand the built artifacts to the platform
    fn deploy(&self, _ctx: &DeployContext<'_>, _plan: &DeployPlan) -> Result<StageResult> {
        Err(PlatformError::not_implemented(self.name(), "deploy").into())
    }

    /// Run all stages in order, stopping at the first failure
    fn run(&self, ctx: &DeployContext<'_>) -> StageResult {
        lifecycle::run(self, ctx)
    }
}
