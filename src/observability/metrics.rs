//! Metrics collection and exposition.
//!
//! # Metrics
//! - `zimage_http_requests_total` (counter): requests by method, status
//! - `zimage_http_request_duration_seconds` (histogram): latency by method
//! - `zimage_favorite_toggles_total` (counter): toggles by action
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "zimage_http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "zimage_http_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_favorite_toggle(added: bool) {
    let action = if added { "added" } else { "removed" };
    metrics::counter!("zimage_favorite_toggles_total", "action" => action).increment(1);
}
