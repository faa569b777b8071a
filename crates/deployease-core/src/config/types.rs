//! Configuration types

use serde::{Deserialize, Serialize};

/// Main configuration for DeployEase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform to use instead of auto-detection (name or slug)
    pub platform: Option<String>,

    /// Directories probed, in order, for the suggested publish directory
    pub publish_dir_candidates: Vec<String>,

    /// Vendor CLI installation policy
    pub install: InstallConfig,

    /// Git configuration for push-based platforms
    pub git: GitConfig,

    /// Cloudflare Workers/Pages defaults
    pub cloudflare: CloudflareConfig,

    /// Firebase Hosting defaults
    pub firebase: FirebaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: None,
            publish_dir_candidates: vec![
                "build".to_string(),
                "dist".to_string(),
                "out".to_string(),
                "public".to_string(),
            ],
            install: InstallConfig::default(),
            git: GitConfig::default(),
            cloudflare: CloudflareConfig::default(),
            firebase: FirebaseConfig::default(),
        }
    }
}

/// Vendor CLI installation policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Try `npm install -g <package>` when a vendor CLI is missing
    pub global: bool,

    /// Fall back to `npx <package>` when the CLI cannot be installed
    pub allow_npx: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            global: true,
            allow_npx: true,
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote to push to
    pub remote: String,

    /// Message used when committing pending changes before a push
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            commit_message: "Deploy to Render via DeployEase".to_string(),
        }
    }
}

/// Cloudflare configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudflareConfig {
    /// Worker name written into a scaffolded wrangler.toml
    pub worker_name: String,

    /// Suggested Pages project name
    pub project_name: String,

    /// Default Workers entry point
    pub default_entry: String,

    /// compatibility_date written into a scaffolded wrangler.toml
    pub compatibility_date: String,
}

impl Default for CloudflareConfig {
    fn default() -> Self {
        Self {
            worker_name: "my-cloudflare-project".to_string(),
            project_name: "my-cloudflare-project".to_string(),
            default_entry: "dist/index.js".to_string(),
            compatibility_date: "2025-02-20".to_string(),
        }
    }
}

/// Firebase configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    /// Hosting public directory written into a scaffolded firebase.json
    pub public_dir: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            public_dir: "public".to_string(),
        }
    }
}
