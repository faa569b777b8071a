//! wrangler.toml handling

use std::path::Path;

use deployease_core::config::CloudflareConfig;
use deployease_core::error::Result;
use deployease_core::PlatformError;
use serde::Serialize;

/// Manifest file name
pub const WRANGLER_TOML: &str = "wrangler.toml";

/// The minimal manifest written when scaffolding a Worker
#[derive(Debug, Clone, Serialize)]
pub struct BasicManifest<'a> {
    pub name: &'a str,
    pub main: &'a str,
    pub compatibility_date: &'a str,
}

impl<'a> BasicManifest<'a> {
    /// Manifest for `main` using the configured name and date
    pub fn new(config: &'a CloudflareConfig, main: &'a str) -> Self {
        Self {
            name: &config.worker_name,
            main,
            compatibility_date: &config.compatibility_date,
        }
    }
}

/// Read the Worker entry (`main`) from a wrangler.toml, if it declares one
pub fn read_main(path: &Path) -> Result<Option<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| PlatformError::ManifestNotFound(path.to_path_buf()))?;

    let value: toml::Value = toml::from_str(&content).map_err(|e| PlatformError::ManifestParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(value
        .get("main")
        .and_then(toml::Value::as_str)
        .map(str::trim)
        .filter(|main| !main.is_empty())
        .map(str::to_string))
}

/// Write (or overwrite) a basic manifest
pub fn write_basic(path: &Path, manifest: &BasicManifest<'_>) -> Result<()> {
    let update_error = |reason: String| PlatformError::ManifestUpdateError {
        path: path.to_path_buf(),
        reason,
    };

    let content = toml::to_string(manifest).map_err(|e| update_error(e.to_string()))?;
    std::fs::write(path, content).map_err(|e| update_error(e.to_string()))?;
    Ok(())
}
