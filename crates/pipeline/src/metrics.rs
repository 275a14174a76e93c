//! Gate metrics helpers
//!
//! Counters and histograms published through the `metrics` facade. Nothing
//! is recorded until a recorder is installed, so library users who skip
//! [`init_metrics`] pay only a no-op macro call.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use response_gate_core::{Error, Result, ScoreDimension};

/// Install the Prometheus recorder and return its scrape handle
///
/// Call at most once per process; a second install fails.
pub fn init_metrics() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| Error::Config(format!("Failed to install metrics recorder: {}", e)))
}

/// Count a request entering the gate
pub fn record_request() {
    counter!("gate_requests_total").increment(1);
}

/// Count the verdict outcome
pub fn record_verdict(accepted: bool) {
    if accepted {
        counter!("gate_accepted_total").increment(1);
    } else {
        counter!("gate_rejected_total").increment(1);
    }
}

/// Count an analyzer that degraded to the neutral score
pub fn record_analyzer_degraded(dimension: ScoreDimension) {
    counter!("gate_analyzer_degraded_total", "dimension" => dimension.as_str()).increment(1);
}

/// Record the scoring phase duration
pub fn record_scoring_latency(seconds: f64) {
    histogram!("gate_scoring_duration_seconds").record(seconds);
}

/// Record one synthesis call duration
pub fn record_synthesis_latency(seconds: f64) {
    histogram!("gate_synthesis_duration_seconds").record(seconds);
}

/// Record the end-to-end gate duration
pub fn record_gate_latency(seconds: f64) {
    histogram!("gate_duration_seconds").record(seconds);
}
