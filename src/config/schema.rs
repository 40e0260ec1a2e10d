//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! fall back to defaults for every omitted field.

use serde::{Deserialize, Serialize};

/// Root configuration for the router service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Route table definitions.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// A single `(method, pattern)` binding and the response it produces.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Optional identifier for logs.
    #[serde(default)]
    pub name: Option<String>,

    /// HTTP method, matched verbatim (e.g., "GET").
    pub method: String,

    /// Path pattern. `:name` segments bind parameters; a trailing `/`
    /// registers a wildcard.
    pub pattern: String,

    /// Response status code.
    #[serde(default = "default_status")]
    pub status: u16,

    /// Response body. `{name}` placeholders are filled from bound parameters.
    #[serde(default)]
    pub body: String,

    /// Response content type.
    #[serde(default)]
    pub content_type: Option<String>,
}

fn default_status() -> u16 {
    200
}

impl RouteConfig {
    /// Minimal route answering `200` with `body`.
    pub fn new(method: impl Into<String>, pattern: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: None,
            method: method.into(),
            pattern: pattern.into(),
            status: default_status(),
            body: body.into(),
            content_type: None,
        }
    }

    /// Name used in logs: the configured name, or `METHOD pattern`.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.method, self.pattern))
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
