//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Count dispatch outcomes per method
//! - Record dispatch latency (lookup plus handler)
//! - Expose a Prometheus-compatible scrape endpoint
//!
//! # Metrics
//! - `router_dispatch_total` (counter): requests by method, outcome
//! - `router_dispatch_duration_seconds` (histogram): dispatch latency
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Both labels are closed sets: methods outside the standard HTTP set
//!   are recorded as `other`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Result of a dispatch, used as the `outcome` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    NotFound,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Matched => "matched",
            Outcome::NotFound => "not_found",
        }
    }
}

/// Label value for a request method.
///
/// Clients may send any token as a method; only the standard methods get
/// their own series.
pub fn method_label(method: &str) -> &'static str {
    match method {
        "GET" => "GET",
        "HEAD" => "HEAD",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "CONNECT" => "CONNECT",
        "OPTIONS" => "OPTIONS",
        "TRACE" => "TRACE",
        "PATCH" => "PATCH",
        _ => "other",
    }
}

/// Install the Prometheus recorder and its HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one dispatch.
pub fn record_dispatch(method: &str, outcome: Outcome, start_time: Instant) {
    let labels = [
        ("method", method_label(method)),
        ("outcome", outcome.as_str()),
    ];
    ::metrics::counter!("router_dispatch_total", &labels).increment(1);
    ::metrics::histogram!("router_dispatch_duration_seconds", &labels)
        .record(start_time.elapsed().as_secs_f64());
}
