//! Output gate pipeline
//!
//! Assembles the scoring, aggregation, filtering, synthesis, and reroute
//! stages into the [`OutputGate`] orchestrator. The gate is the only
//! entry point callers need:
//!
//! ```ignore
//! let settings = load_settings(None)?;
//! let gate = OutputGate::standard(&settings).await?;
//!
//! let request = GateRequest::new("What is the capital of France?", candidate);
//! let outcome = gate.process(&request).await?;
//! ```

pub mod adapters;
pub mod gate;
pub mod metrics;

pub use adapters::{EndpointSelector, HttpSynthesizer, RetryingSynthesizer};
pub use gate::{GateEvent, GatePhase, OutputGate};
pub use metrics::{
    init_metrics, record_analyzer_degraded, record_gate_latency, record_request,
    record_scoring_latency, record_synthesis_latency, record_verdict,
};
