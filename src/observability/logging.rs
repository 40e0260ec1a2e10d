//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Honour `RUST_LOG`, falling back to the configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Dispatch events carry `request_id`, `method` and `path` fields

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for `level`, covering this crate and tower-http.
pub fn default_directive(level: &str) -> String {
    format!("urlrouter={level},tower_http={level}")
}

/// Install the global subscriber.
///
/// Returns an error if a global subscriber is already set.
pub fn init_tracing(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(level).into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("debug"), "urlrouter=debug,tower_http=debug");
    }
}
