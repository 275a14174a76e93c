//! Run a few candidate responses through the output gate

use response_gate_config::Settings;
use response_gate_core::GateRequest;
use response_gate_pipeline::{init_metrics, GateEvent, OutputGate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Output Gate Demo ===\n");

    let mut settings = Settings::default();
    // No synthesis service in the demo; accepted responses stay text-only
    settings.synthesis.enabled = false;

    if settings.observability.metrics_enabled {
        let _metrics_handle = init_metrics()?;
        tracing::info!("Initialized Prometheus metrics recorder");
    }

    let gate = OutputGate::standard(&settings).await?;
    let mut events = gate.subscribe();

    println!(
        "Gate ready (threshold: {}, router: {})\n",
        gate.confidence_threshold(),
        gate.has_router()
    );

    let cases = [
        (
            "On-topic answer",
            "What is the capital of France?",
            "The capital of France is Paris. It is a lovely city to visit.",
        ),
        (
            "Answer naming a person",
            "Who is the president?",
            "The president is John Smith. Elections happen every four years.",
        ),
        (
            "Off-topic answer",
            "How do I reset my password?",
            "That is a terrible question and I refuse to answer it.",
        ),
    ];

    for (label, query, candidate) in cases {
        println!("--- {} ---", label);
        println!("Query:     {}", query);
        println!("Candidate: {}", candidate);

        let request = GateRequest::new(query, candidate);
        let outcome = gate.process(&request).await?;

        println!(
            "Accepted:  {} (score: {:.3})",
            outcome.accepted, outcome.overall_score
        );
        if let Some(text) = &outcome.filtered_text {
            println!("Filtered:  '{}'", text);
        }
        match &outcome.audio {
            Some(artifact) => println!("Audio:     {} bytes ({})", artifact.len(), artifact.format),
            None => println!("Audio:     none"),
        }

        while let Ok(event) = events.try_recv() {
            if let GateEvent::Rerouted { decision, .. } = event {
                println!("Rerouted:  {} handler", decision.category);
            }
        }
        println!();
    }

    Ok(())
}
