//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): total requests by route, method, status
//! - `api_request_duration_seconds` (histogram): latency by route
//! - `api_rejections_total` (counter): error responses by taxonomy kind
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so tests and
//!   metrics-disabled deployments pay nothing
//! - Route label is the matched route template, never the raw URI

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(route: &str, method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "api_requests_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);

    metrics::histogram!("api_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record an error response by taxonomy kind.
pub fn record_rejection(kind: &'static str) {
    metrics::counter!("api_rejections_total", "kind" => kind).increment(1);
}
