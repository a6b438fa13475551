//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dispatcher_requests_total` (counter): requests by route kind, method, status
//! - `dispatcher_request_duration_seconds` (histogram): latency by route kind
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Route kind is `wsdl` or `message`; raw paths are never used as labels

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one handled request.
pub fn record_request(route: &'static str, method: &str, status: u16, start_time: Instant) {
    metrics::counter!(
        "dispatcher_requests_total",
        "route" => route,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("dispatcher_request_duration_seconds", "route" => route)
        .record(start_time.elapsed().as_secs_f64());
}
