//! Core types for DeployEase

use serde::{Deserialize, Serialize};

/// Lifecycle stages a platform goes through, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Verify (or establish) the vendor CLI session
    Authenticate,
    /// Resolve per-run choices and scaffold manifests
    Configure,
    /// Run the project's declared build step
    Build,
    /// Hand the artifacts to the platform
    Deploy,
}

impl Stage {
    /// Get the stage name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::Configure => "configure",
            Self::Build => "build",
            Self::Deploy => "deploy",
        }
    }

    /// Get all stages in order
    pub fn all() -> &'static [Stage] {
        &[
            Self::Authenticate,
            Self::Configure,
            Self::Build,
            Self::Deploy,
        ]
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a lifecycle stage, and of a whole platform run
///
/// A failed result always carries a non-empty error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    /// Whether the stage succeeded
    pub success: bool,
    /// Human-readable failure reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// URL discovered in deploy output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl StageResult {
    /// Create a successful result
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            url: None,
        }
    }

    /// Create a failed result
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "unknown error".to_string()
        } else {
            error
        };

        Self {
            success: false,
            error: Some(error),
            url: None,
        }
    }

    /// Attach a URL (ignored when `None`)
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    /// Failure message, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Outcome of the authenticate stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResult {
    /// Whether a usable session exists
    pub authenticated: bool,
    /// Why authentication failed (empty when authenticated)
    pub error: String,
}

impl AuthenticationResult {
    /// Authenticated session
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
            error: String::new(),
        }
    }

    /// No usable session
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            error: error.into(),
        }
    }
}
