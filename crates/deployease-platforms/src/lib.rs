//! DeployEase Platforms - Hosting platform integrations
//!
//! Each platform drives a vendor's own tooling (a CLI, npm scripts or git)
//! through the same four stages: authenticate, configure, build, deploy.

pub mod authenticator;
pub mod build;
pub mod cloudflare;
pub mod context;
pub mod detector;
pub mod firebase;
pub mod github;
pub mod id;
pub mod installer;
pub mod koyeb;
pub mod lifecycle;
pub mod manifest;
pub mod netlify;
pub mod orchestrator;
pub mod output;
pub mod publish;
pub mod railway;
pub mod registry;
pub mod render;
pub mod traits;
pub mod vercel;

pub use build::default_build;
pub use cloudflare::CloudflarePlatform;
pub use context::{DeployContext, DeployMode, DeployPlan};
pub use detector::detect_platform;
pub use firebase::FirebasePlatform;
pub use github::GitHubPagesPlatform;
pub use id::PlatformId;
pub use installer::{CliInvocation, CliTool};
pub use koyeb::KoyebPlatform;
pub use netlify::NetlifyPlatform;
pub use orchestrator::{choose_platform, deploy, DeployOutcome};
pub use railway::RailwayPlatform;
pub use registry::PlatformRegistry;
pub use render::RenderPlatform;
pub use traits::Platform;
pub use vercel::VercelPlatform;
