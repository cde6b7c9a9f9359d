//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the environment tier names a real upstream host
//! - Validate value ranges (timeouts > 0, non-empty upload dir)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// Environment tiers the upstream API exposes.
const KNOWN_ENVIRONMENTS: &[&str] = &["sandbox", "development", "production"];

/// A single semantic configuration problem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown upstream environment '{0}' (expected sandbox, development, or production)")]
    UnknownEnvironment(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("upload directory must not be empty")]
    EmptyUploadDir,
}

/// Validate a loaded configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !KNOWN_ENVIRONMENTS.contains(&config.upstream.environment.as_str()) {
        errors.push(ValidationError::UnknownEnvironment(
            config.upstream.environment.clone(),
        ));
    }
    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("server.request_timeout_secs"));
    }
    if config.uploads.dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyUploadDir);
    }

    // Placeholder credentials against the production tier is almost
    // certainly a deployment mistake, but not fatal for local testing.
    if config.upstream.environment == "production"
        && config.upstream.credentials.is_placeholder()
    {
        tracing::warn!("placeholder credentials configured against the production tier");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
