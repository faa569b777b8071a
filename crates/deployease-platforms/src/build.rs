//! Shared build stage

use deployease_core::{CommandLine, ExecMode, StageResult};
use tracing::{debug, info};

use crate::context::DeployContext;
use crate::manifest::PackageManifest;

/// Run the project's npm build script, if it declares one.
///
/// No `package.json` or no `scripts.build` means there is nothing to build,
/// which is a success. The build streams to the terminal while its output
/// is captured for the failure message.
pub fn default_build(ctx: &DeployContext<'_>) -> StageResult {
    let manifest_path = ctx.path("package.json");
    if !manifest_path.is_file() {
        ctx.info("No package.json found, skipping build step");
        return StageResult::ok();
    }

    let manifest = match PackageManifest::load(&manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => return StageResult::failed(format!("Build failed: {}", e)),
    };

    if manifest.script("build").is_none() {
        ctx.warn("No build script found in package.json. Skipping build, make sure your files are ready to deploy.");
        return StageResult::ok();
    }

    ctx.step("Running build...");
    let output = ctx.run(
        &CommandLine::new("npm").args(["run", "build"]),
        ExecMode::Stream,
    );

    if output.success {
        info!("build completed");
        ctx.success("Build completed!");
        StageResult::ok()
    } else {
        let reason = output.failure_reason();
        debug!(error = %reason, "build failed");
        ctx.error(format!("Build failed: {}", reason));
        StageResult::failed(format!("Build failed: {}", reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::TestHarness;
    use deployease_core::ExecOutput;

    #[test]
    fn test_skips_without_package_json() {
        let harness = TestHarness::new();
        assert!(default_build(&harness.context()).success);
        assert!(harness.executor.calls().is_empty());
    }

    #[test]
    fn test_skips_without_build_script() {
        let harness = TestHarness::new();
        harness.write("package.json", r#"{"name": "site", "scripts": {"start": "serve"}}"#);

        assert!(default_build(&harness.context()).success);
        assert!(harness.executor.calls().is_empty());
        assert!(harness.reporter.contains("No build script"));
    }

    #[test]
    fn test_runs_build_script_streamed() {
        let harness = TestHarness::new();
        harness.write("package.json", r#"{"scripts": {"build": "vite build"}}"#);

        assert!(default_build(&harness.context()).success);
        assert_eq!(
            harness.executor.calls_with_mode(),
            vec![("npm run build".to_string(), ExecMode::Stream)]
        );
    }

    #[test]
    fn test_build_failure_carries_reason() {
        let harness = TestHarness::new()
            .executor(|e| e.respond("npm run build", ExecOutput::failed("tsc: 3 errors")));
        harness.write("package.json", r#"{"scripts": {"build": "tsc"}}"#);

        let result = default_build(&harness.context());
        assert!(!result.success);
        assert_eq!(result.error_message(), Some("Build failed: tsc: 3 errors"));
    }

    #[test]
    fn test_unreadable_package_json_fails() {
        let harness = TestHarness::new();
        harness.write("package.json", "{ broken");

        let result = default_build(&harness.context());
        assert!(!result.success);
        assert!(result.error_message().unwrap().starts_with("Build failed"));
    }
}
