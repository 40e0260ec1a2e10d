//! Registration errors.

use thiserror::Error;

/// Error returned when a route cannot be registered.
///
/// Dispatch has no error type: a missing route is a normal `None` result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The pattern was empty.
    #[error("invalid pattern: pattern must not be empty (method {method})")]
    InvalidPattern { method: String },

    /// No handler was supplied for the pattern.
    #[error("invalid handler: no handler supplied for {method} {pattern}")]
    InvalidHandler { method: String, pattern: String },
}
