//! Metrics collection and exposition.
//!
//! # Metrics
//! - `support_quotes_total` (counter): USD quotes read from the contract
//! - `support_donations_submitted_total` (counter): broadcast donations
//! - `support_donation_outcomes_total` (counter): confirmed donations by outcome
//! - `support_donation_failures_total` (counter): failures by stage (submit, receipt)
//! - `support_rpc_healthy` (gauge): 1=reachable, 0=unreachable
//! - `support_http_request_duration_seconds` (histogram): API latency by route and status
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::donation::Outcome;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_quote() {
    counter!("support_quotes_total").increment(1);
}

pub fn record_donation_submitted() {
    counter!("support_donations_submitted_total").increment(1);
}

pub fn record_donation_outcome(outcome: Outcome) {
    counter!("support_donation_outcomes_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_donation_failure(stage: &'static str) {
    counter!("support_donation_failures_total", "stage" => stage).increment(1);
}

pub fn record_rpc_health(healthy: bool) {
    gauge!("support_rpc_healthy").set(if healthy { 1.0 } else { 0.0 });
}

pub fn record_request(route: &str, status: u16, start: Instant) {
    histogram!(
        "support_http_request_duration_seconds",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
