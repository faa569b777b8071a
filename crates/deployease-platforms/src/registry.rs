//! Platform registry

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::cloudflare::CloudflarePlatform;
use crate::firebase::FirebasePlatform;
use crate::github::GitHubPagesPlatform;
use crate::id::PlatformId;
use crate::koyeb::KoyebPlatform;
use crate::netlify::NetlifyPlatform;
use crate::railway::RailwayPlatform;
use crate::render::RenderPlatform;
use crate::traits::Platform;
use crate::vercel::VercelPlatform;

/// Registry of available platforms
///
/// Registration order is detection priority.
pub struct PlatformRegistry {
    platforms: Vec<Arc<dyn Platform>>,
}

impl PlatformRegistry {
    /// Create a new registry with all built-in platforms
    pub fn new() -> Self {
        Self {
            platforms: vec![
                Arc::new(NetlifyPlatform::new()),
                Arc::new(VercelPlatform::new()),
                Arc::new(FirebasePlatform::new()),
                Arc::new(GitHubPagesPlatform::new()),
                Arc::new(CloudflarePlatform::new()),
                Arc::new(RenderPlatform::new()),
                Arc::new(RailwayPlatform::new()),
                Arc::new(KoyebPlatform::new()),
            ],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            platforms: Vec::new(),
        }
    }

    /// Register a platform
    pub fn register<P: Platform + 'static>(&mut self, platform: P) {
        self.platforms.push(Arc::new(platform));
    }

    /// Get all registered platforms
    pub fn all(&self) -> &[Arc<dyn Platform>] {
        &self.platforms
    }

    /// Get platform names
    pub fn names(&self) -> Vec<&'static str> {
        self.platforms.iter().map(|p| p.name()).collect()
    }

    /// Look up a platform by name, case-insensitively.
    ///
    /// An exact match on the display name or short id wins; otherwise the
    /// first platform whose name contains the query, or is contained in it.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn Platform>> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let id = PlatformId::parse(&needle);
        let exact = self
            .platforms
            .iter()
            .find(|p| p.name().to_lowercase() == needle || (id.is_some() && p.id() == id));
        if let Some(platform) = exact {
            return Some(Arc::clone(platform));
        }

        self.platforms
            .iter()
            .find(|p| {
                let candidate = p.name().to_lowercase();
                candidate.contains(&needle) || needle.contains(&candidate)
            })
            .cloned()
    }

    /// Detect which platform the project at `root` is configured for.
    ///
    /// A platform whose detection errors is skipped.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn detect(&self, root: &Path) -> Option<Arc<dyn Platform>> {
        for platform in &self.platforms {
            match platform.detect(root) {
                Ok(true) => {
                    info!(platform = platform.name(), "detected platform");
                    return Some(Arc::clone(platform));
                }
                Ok(false) => {}
                Err(e) => warn!(platform = platform.name(), error = %e, "error while detecting"),
            }
        }

        info!("no platform detected from project files");
        None
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
