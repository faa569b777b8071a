//! Configuration validation

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_publish_dirs(config)?;
    validate_git(config)?;
    validate_cloudflare(config)?;
    validate_firebase(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> crate::error::DeployEaseError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
    .into()
}

fn validate_publish_dirs(config: &Config) -> Result<()> {
    for (i, dir) in config.publish_dir_candidates.iter().enumerate() {
        if dir.trim().is_empty() {
            return Err(invalid(
                format!("publish_dir_candidates[{}]", i),
                "directory cannot be empty",
            ));
        }
        if Path::new(dir).is_absolute() {
            return Err(invalid(
                format!("publish_dir_candidates[{}]", i),
                "must be relative to the project root",
            ));
        }
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.trim().is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty"));
    }

    if config.git.commit_message.trim().is_empty() {
        return Err(invalid("git.commit_message", "commit message cannot be empty"));
    }

    Ok(())
}

fn validate_cloudflare(config: &Config) -> Result<()> {
    let cf = &config.cloudflare;

    if cf.worker_name.trim().is_empty() {
        return Err(invalid("cloudflare.worker_name", "worker name cannot be empty"));
    }

    if cf.default_entry.trim().is_empty() {
        return Err(invalid("cloudflare.default_entry", "entry point cannot be empty"));
    }

    if NaiveDate::parse_from_str(&cf.compatibility_date, "%Y-%m-%d").is_err() {
        return Err(invalid(
            "cloudflare.compatibility_date",
            "must be a calendar date formatted as YYYY-MM-DD",
        ));
    }

    Ok(())
}

fn validate_firebase(config: &Config) -> Result<()> {
    if config.firebase.public_dir.trim().is_empty() {
        return Err(invalid("firebase.public_dir", "public directory cannot be empty"));
    }

    Ok(())
}
