//! Exit codes for the CLI

/// Success, and also the usage banner
pub const SUCCESS: i32 = 0;

/// Deployment failed or an internal error occurred
pub const ERROR: i32 = 1;
