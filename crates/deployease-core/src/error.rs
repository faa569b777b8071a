//! Error types for DeployEase

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DeployEaseError
pub type Result<T> = std::result::Result<T, DeployEaseError>;

/// Main error type for DeployEase operations
#[derive(Debug, Error)]
pub enum DeployEaseError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Platform-related errors
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Interactive prompt errors
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Platform-related errors
#[derive(Debug, Error)]
pub enum PlatformError {
    /// A lifecycle operation was invoked on a platform that does not provide it
    #[error("{operation}() must be implemented (platform: {platform})")]
    NotImplemented {
        platform: String,
        operation: &'static str,
    },

    /// No platform matches the requested name
    #[error("Platform not recognized: {0}")]
    NotFound(String),

    /// Manifest file not found
    #[error("Manifest not found at {0}")]
    ManifestNotFound(PathBuf),

    /// Failed to parse a manifest
    #[error("Failed to parse manifest {path}: {reason}")]
    ManifestParseError { path: PathBuf, reason: String },

    /// Failed to write a manifest
    #[error("Failed to update manifest {path}: {reason}")]
    ManifestUpdateError { path: PathBuf, reason: String },
}

/// Interactive prompt errors
#[derive(Debug, Error)]
pub enum PromptError {
    /// The terminal interaction failed
    #[error("Prompt failed: {0}")]
    Interaction(String),

    /// A scripted prompt ran out of answers
    #[error("No scripted answer left for prompt: {0}")]
    Exhausted(String),

    /// A selection was required but the session is non-interactive
    #[error("A selection is required for '{0}' but prompts are disabled")]
    SelectionRequired(String),

    /// The menu has nothing to choose from
    #[error("Menu '{0}' has no options")]
    EmptyMenu(String),
}

impl DeployEaseError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

impl PlatformError {
    /// Create a "must be implemented" error for an operation
    pub fn not_implemented(platform: impl Into<String>, operation: &'static str) -> Self {
        Self::NotImplemented {
            platform: platform.into(),
            operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_message() {
        let err = PlatformError::not_implemented("X", "detect");
        assert!(err.to_string().contains("detect() must be implemented"));
    }

    #[test]
    fn test_transparent_wrapping() {
        let err: DeployEaseError = PlatformError::NotFound("surge".to_string()).into();
        assert_eq!(err.to_string(), "Platform not recognized: surge");
    }
}
