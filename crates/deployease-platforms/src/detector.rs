//! Platform detection from marker files

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::id::PlatformId;

/// Whether any of `id`'s marker files or directories exists under `root`.
///
/// Filesystem errors (permissions, broken links) count as "not present".
pub fn markers_present(root: &Path, id: PlatformId) -> bool {
    id.markers().iter().any(|marker| {
        let present = root.join(marker).try_exists().unwrap_or(false);
        if present {
            debug!(platform = %id, marker, "marker found");
        }
        present
    })
}

/// Detect the platform a project is configured for.
///
/// Platforms are checked in fixed priority order (see [`PlatformId::all`]);
/// the first one with a marker present wins.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn detect_platform(root: &Path) -> Option<PlatformId> {
    let detected = PlatformId::all()
        .iter()
        .copied()
        .find(|id| markers_present(root, *id));

    match detected {
        Some(id) => info!(platform = %id, "detected platform"),
        None => info!("no deployment platform detected"),
    }
    detected
}
