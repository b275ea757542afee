//! Metrics collection and exposition.
//!
//! # Metrics
//! - `theme_requests_total` (counter): requests by outcome, status
//! - `theme_request_duration_seconds` (histogram): latency by outcome
//!
//! Outcomes: `public`, `template`, `unavailable`, `error`, `redirect`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "theme_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("theme_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
