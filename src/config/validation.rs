//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limits > 0)
//! - Check route names and patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: IntercoolerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::IntercoolerConfig;
use crate::routing::RoutePattern;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),
    #[error("admission.max_form_bytes must be greater than zero")]
    ZeroFormLimit,
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
    #[error("route #{0} has an empty name")]
    EmptyRouteName(usize),
    #[error("duplicate route name {0:?}")]
    DuplicateRouteName(String),
    #[error("route {name:?}: {reason}")]
    InvalidPattern { name: String, reason: String },
}

/// Check a parsed configuration.
pub fn validate_config(config: &IntercoolerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.admission.max_form_bytes == 0 {
        errors.push(ValidationError::ZeroFormLimit);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let mut seen = HashSet::new();
    for (i, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName(i));
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }
        if let Err(e) = RoutePattern::parse(&route.pattern) {
            errors.push(ValidationError::InvalidPattern {
                name: route.name.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
