//! Publish directory selection

use std::path::Path;

use deployease_core::error::Result;
use deployease_core::StageResult;
use tracing::debug;

use crate::context::{DeployContext, DeployPlan};

/// Directory suggested to the user: the first configured candidate that
/// exists, else `public`, written as `./<dir>`
pub fn suggested_publish_dir(ctx: &DeployContext<'_>) -> String {
    let dir = ctx
        .config
        .publish_dir_candidates
        .iter()
        .find(|candidate| ctx.path(candidate.as_str()).is_dir())
        .map(String::as_str)
        .unwrap_or("public");
    format!("./{}", dir)
}

/// Check that `dir` (relative to `root`) holds something worth publishing.
///
/// A directory whose only entry is `.gitkeep` counts as empty.
pub fn check_publish_dir(root: &Path, dir: &str) -> std::result::Result<(), String> {
    let path = root.join(dir);
    if !path.is_dir() {
        return Err(format!(
            "Publish directory '{}' does not exist. Please build your project first.",
            dir
        ));
    }

    let has_content = std::fs::read_dir(&path)
        .map(|entries| {
            entries
                .filter_map(std::result::Result::ok)
                .any(|entry| entry.file_name() != ".gitkeep")
        })
        .unwrap_or(false);

    if has_content {
        Ok(())
    } else {
        Err(format!(
            "Publish directory '{}' is empty. Please build your project first.",
            dir
        ))
    }
}

/// Ask which directory to publish and record it on the plan
pub fn configure_publish_dir(ctx: &DeployContext<'_>, plan: &mut DeployPlan) -> Result<StageResult> {
    let suggested = suggested_publish_dir(ctx);
    let dir = ctx
        .prompt
        .ask("Which directory contains your built files?", &suggested)?;

    if let Err(message) = check_publish_dir(ctx.root, &dir) {
        ctx.error(&message);
        return Ok(StageResult::failed(message));
    }

    debug!(dir = %dir, "publish directory selected");
    ctx.info(format!("Will deploy from '{}'", dir));
    plan.publish_dir = Some(dir);
    Ok(StageResult::ok())
}
