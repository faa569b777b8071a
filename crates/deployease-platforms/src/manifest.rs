//! npm package.json handling
//!
//! Only `scripts` is interpreted. The rest of the document is carried
//! through untouched, key order included, so rewriting a manifest only
//! changes the script that was set.

use std::path::Path;

use deployease_core::error::Result;
use deployease_core::PlatformError;
use serde_json::{Map, Value};

/// The project's package.json
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    document: Map<String, Value>,
}

impl PackageManifest {
    /// Load package.json from path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| PlatformError::ManifestNotFound(path.to_path_buf()))?;

        let value: Value =
            serde_json::from_str(&content).map_err(|e| PlatformError::ManifestParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(document) => Ok(Self { document }),
            _ => Err(PlatformError::ManifestParseError {
                path: path.to_path_buf(),
                reason: "expected a JSON object".to_string(),
            }
            .into()),
        }
    }

    /// Save package.json to path
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.document).map_err(|e| {
            PlatformError::ManifestUpdateError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        // Ensure trailing newline
        let content = if content.ends_with('\n') {
            content
        } else {
            format!("{}\n", content)
        };

        std::fs::write(path, content).map_err(|e| {
            PlatformError::ManifestUpdateError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Get a script by name; blank scripts count as absent
    pub fn script(&self, name: &str) -> Option<&str> {
        self.document
            .get("scripts")
            .and_then(|scripts| scripts.get(name))
            .and_then(Value::as_str)
            .filter(|script| !script.trim().is_empty())
    }

    /// Set a script, creating the `scripts` table when needed
    pub fn set_script(&mut self, name: &str, command: &str) {
        let scripts = self
            .document
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));

        if !scripts.is_object() {
            *scripts = Value::Object(Map::new());
        }
        if let Value::Object(scripts) = scripts {
            scripts.insert(name.to_string(), Value::String(command.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_read_scripts() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        std::fs::write(
            &path,
            r#"{"name": "site", "scripts": {"build": "vite build", "lint": ""}}"#,
        )
        .unwrap();

        let manifest = PackageManifest::load(&path).unwrap();
        assert_eq!(manifest.script("build"), Some("vite build"));
        assert_eq!(manifest.script("lint"), None);
        assert_eq!(manifest.script("deploy"), None);
    }

    #[test]
    fn test_set_script_preserves_other_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        std::fs::write(
            &path,
            r#"{"name": "site", "version": "1.0.0", "dependencies": {"react": "^18.0.0"}}"#,
        )
        .unwrap();

        let mut manifest = PackageManifest::load(&path).unwrap();
        manifest.set_script("deploy", "gh-pages -d build");
        manifest.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        assert!(content.find("\"name\"").unwrap() < content.find("\"version\"").unwrap());

        let reloaded = PackageManifest::load(&path).unwrap();
        assert_eq!(reloaded.script("deploy"), Some("gh-pages -d build"));
        assert!(content.contains("react"));
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        assert!(PackageManifest::load(&path).is_err());

        std::fs::write(&path, "{ not json").unwrap();
        let err = PackageManifest::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse manifest"));

        std::fs::write(&path, "[]").unwrap();
        assert!(PackageManifest::load(&path).is_err());
    }
}
