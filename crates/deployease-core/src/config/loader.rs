//! Locating and reading `deployease.toml` / `deployease.yaml`

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::defaults::{CONFIG_FILE_NAMES, CONFIG_SUBDIR};
use super::types::Config;
use super::validation::validate_config;

/// Serialization format of a config file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, anything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    fn parse(self, content: &str) -> Result<Config> {
        let config = match self {
            Self::Toml => toml::from_str(content).map_err(ConfigError::TomlError)?,
            Self::Yaml => serde_yaml::from_str(content).map_err(ConfigError::YamlError)?,
        };
        Ok(config)
    }
}

/// Parse and validate a config file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = ConfigFormat::from_path(path);
    info!(path = %path.display(), ?format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = format.parse(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Paths that may hold a config file for a single directory, in priority order.
///
/// For every name the directory itself is checked before its `.github/`.
fn candidates(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    CONFIG_FILE_NAMES
        .iter()
        .flat_map(move |name| [dir.join(name), dir.join(CONFIG_SUBDIR).join(name)])
}

/// Nearest config file at or above `start_dir`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir
        .ancestors()
        .flat_map(candidates)
        .find(|path| path.is_file());

    match &found {
        Some(path) => debug!(path = %path.display(), "found config file"),
        None => debug!(start_dir = %start_dir.display(), "no config file found"),
    }
    found
}

/// Load the nearest config, or defaults when the project has none.
///
/// A config file that exists but fails to parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    let Some(path) = find_config(dir) else {
        return Ok((Config::default(), None));
    };

    let config = load_config(&path)?;
    Ok((config, Some(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("deployease.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new(".deployease.yaml")), ConfigFormat::Yaml);
    }

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("deployease.toml");
        std::fs::write(&config_path, "platform = \"netlify\"").unwrap();

        assert_eq!(find_config(temp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("deployease.toml");
        std::fs::write(&toml_path, "platform = \"netlify\"").unwrap();
        std::fs::write(temp.path().join("deployease.yaml"), "platform: vercel").unwrap();

        assert_eq!(find_config(temp.path()), Some(toml_path));
    }

    #[test]
    fn test_find_config_in_github_dir() {
        let temp = TempDir::new().unwrap();
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        let config_path = github_dir.join("deployease.toml");
        std::fs::write(&config_path, "platform = \"render\"").unwrap();

        assert_eq!(find_config(temp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_walks_up_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(".deployease.yaml");
        std::fs::write(&config_path, "platform: koyeb").unwrap();
        let nested = temp.path().join("packages/web");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(config_path));
    }

    #[test]
    fn test_nearest_config_wins() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("deployease.toml"), "platform = \"netlify\"").unwrap();
        let nested = temp.path().join("site");
        std::fs::create_dir_all(&nested).unwrap();
        let inner = nested.join("deployease.yaml");
        std::fs::write(&inner, "platform: vercel").unwrap();

        assert_eq!(find_config(&nested), Some(inner));
    }

    #[test]
    fn test_directory_named_like_config_is_ignored() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("deployease.toml")).unwrap();
        let yaml = temp.path().join("deployease.yaml");
        std::fs::write(&yaml, "platform: railway").unwrap();

        assert_eq!(find_config(temp.path()), Some(yaml));
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("deployease.toml");
        std::fs::write(
            &config_path,
            "platform = \"cloudflare\"\n\n[git]\nremote = \"upstream\"\n\n[install]\nallow_npx = false\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.platform.as_deref(), Some("cloudflare"));
        assert_eq!(config.git.remote, "upstream");
        assert!(!config.install.allow_npx);
        assert!(config.install.global);
        assert_eq!(config.publish_dir_candidates.len(), 4);
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("deployease.yaml");
        std::fs::write(
            &config_path,
            "publish_dir_candidates:\n  - site\n  - dist\nfirebase:\n  public_dir: web\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.publish_dir_candidates, vec!["site", "dist"]);
        assert_eq!(config.firebase.public_dir, "web");
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert!(config.platform.is_none());
    }

    #[test]
    fn test_load_config_or_default_rejects_invalid_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("deployease.toml"), "[git]\nremote = \"\"\n").unwrap();
        assert!(load_config_or_default(temp.path()).is_err());
    }
}
