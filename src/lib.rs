//! Method-and-path request router.
//!
//! The core is [`routing`]: a per-method trie of path tokens resolving a
//! concrete path to a handler while binding `:name` segments. The other
//! modules turn it into a small HTTP service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Match, Params, RouteError, Router, SharedRouter};
