//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject routes that could never be registered (empty method or pattern)
//! - Validate value ranges (status codes, timeouts, addresses)
//! - Warn about duplicate routes, which overwrite each other
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: &RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::schema::RouterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index}: method must not be empty")]
    EmptyMethod { index: usize },

    #[error("route #{index}: pattern must not be empty")]
    EmptyPattern { index: usize },

    #[error("route #{index}: invalid status code {status}")]
    InvalidStatus { index: usize, status: u16 },

    #[error("invalid {field} address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Whether `value` is a `host:port` pair the listener could bind.
///
/// Hostnames are accepted without resolving them; IPv6 hosts must be
/// bracketed.
pub fn is_bind_address(value: &str) -> bool {
    if value.parse::<SocketAddr>().is_ok() {
        return true;
    }
    let Some((host, port)) = value.rsplit_once(':') else {
        return false;
    };
    !host.is_empty()
        && !host.contains([':', '[', ']'])
        && !host.chars().any(char::is_whitespace)
        && port.parse::<u16>().is_ok()
}

/// Check `config` for problems serde cannot detect.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.method.trim().is_empty() {
            errors.push(ValidationError::EmptyMethod { index });
        }
        if route.pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern { index });
        }
        if StatusCode::from_u16(route.status).is_err() {
            errors.push(ValidationError::InvalidStatus {
                index,
                status: route.status,
            });
        }
        if !seen.insert((route.method.as_str(), route.pattern.as_str())) {
            tracing::warn!(
                method = %route.method,
                pattern = %route.pattern,
                "Duplicate route, later definition wins"
            );
        }
    }

    if !is_bind_address(&config.listener.bind_address) {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
