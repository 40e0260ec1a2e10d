//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing and HTTP dispatch produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (dispatch counters and latency histogram)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
