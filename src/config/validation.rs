//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Fail fast on a missing theme before anything is served
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ThemeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ThemeConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("theme not specified")]
    ThemeMissing,

    #[error("base route {0:?} must not contain '..' segments")]
    BaseRouteTraversal(String),

    #[error("template extension {0:?} must start with '.'")]
    TemplateExtension(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("metrics address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &ThemeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.theme.directory.as_os_str().is_empty() {
        errors.push(ValidationError::ThemeMissing);
    }

    if config.theme.base_route.split('/').any(|segment| segment == "..") {
        errors.push(ValidationError::BaseRouteTraversal(
            config.theme.base_route.clone(),
        ));
    }

    let ext = &config.theme.template_extension;
    if ext.len() < 2 || !ext.starts_with('.') {
        errors.push(ValidationError::TemplateExtension(ext.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
