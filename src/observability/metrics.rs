//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define balancer metrics (requests, latency, backend health)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `balancer_requests_total` (counter): requests by method, status, backend
//! - `balancer_request_duration_seconds` (histogram): latency distribution
//! - `balancer_backend_health` (gauge): 1=alive, 0=dead
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - The exporter is installed once from `main`; library code only records

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and serve the scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

/// Record one proxied request.
pub fn record_request(method: &str, status: u16, backend: &str, start: Instant) {
    metrics::counter!(
        "balancer_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "backend" => backend.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "balancer_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a backend health observation.
pub fn record_backend_health(backend: &str, alive: bool) {
    metrics::gauge!(
        "balancer_backend_health",
        "backend" => backend.to_string()
    )
    .set(if alive { 1.0 } else { 0.0 });
}
