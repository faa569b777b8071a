//! DeployEase Core - Core library for platform deployments
//!
//! This crate provides the foundational types, error handling, configuration,
//! process execution and interaction capabilities shared by the platform
//! implementations and the DeployEase CLI.

pub mod config;
pub mod error;
pub mod exec;
pub mod prompt;
pub mod reporter;
pub mod types;

pub use error::{DeployEaseError, PlatformError, PromptError, Result};
pub use exec::{CommandLine, EchoTarget, ExecMode, ExecOutput, Executor, SystemExecutor};
pub use prompt::{DefaultsPrompt, Prompt};
pub use reporter::{Notice, Reporter, TracingReporter};

#[cfg(any(test, feature = "testing"))]
pub use exec::RecordingExecutor;
#[cfg(any(test, feature = "testing"))]
pub use prompt::ScriptedPrompt;
#[cfg(any(test, feature = "testing"))]
pub use reporter::CollectingReporter;
pub use types::{AuthenticationResult, Stage, StageResult};
