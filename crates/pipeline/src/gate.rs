//! Output gate orchestrator
//!
//! Walks one candidate response through the gate phases:
//!
//! ```text
//! Scoring -> Aggregating -+-> Filtering -> Synthesizing -> Done   (accepted)
//!                         `-> Rerouting -> Done                   (rejected)
//! ```
//!
//! Scoring fans out to every registered analyzer under a shared timeout;
//! analyzers that fail or miss the deadline degrade to a neutral score.
//! The verdict picks the branch: acceptance filters sensitive sentences
//! and optionally synthesizes audio, rejection classifies the query for
//! an alternate handler. Phase changes and per-dimension scores are
//! broadcast to subscribers as [`GateEvent`]s.

use futures::future::join_all;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use uuid::Uuid;

use response_gate_analysis::AnalyzerRegistry;
use response_gate_config::constants::gate::NEUTRAL_SCORE;
use response_gate_config::{GateConfig, Settings};
use response_gate_core::{
    AudioArtifact, GateOutcome, GateRequest, QueryRouter, RerouteDecision, Result, RouteCategory,
    ScoreDimension, ScoreSet, SpeechSynthesizer, Verdict, VerdictAggregator,
};
use response_gate_text_processing::{
    KeywordRouter, PatternEntityRecognizer, RuleSentenceSplitter, SensitiveContentFilter,
};

use crate::adapters::{HttpSynthesizer, RetryingSynthesizer};
use crate::metrics::{
    record_analyzer_degraded, record_gate_latency, record_request, record_scoring_latency,
    record_verdict,
};

/// Gate phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    /// Scoring the candidate across all dimensions
    Scoring,
    /// Combining dimension scores into a verdict
    Aggregating,
    /// Dropping sentences with sensitive entities
    Filtering,
    /// Producing the audio artifact
    Synthesizing,
    /// Classifying a rejected query for an alternate handler
    Rerouting,
    /// Terminal phase
    Done,
}

impl GatePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatePhase::Scoring => "scoring",
            GatePhase::Aggregating => "aggregating",
            GatePhase::Filtering => "filtering",
            GatePhase::Synthesizing => "synthesizing",
            GatePhase::Rerouting => "rerouting",
            GatePhase::Done => "done",
        }
    }
}

impl std::fmt::Display for GatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gate events broadcast to subscribers
#[derive(Debug, Clone)]
pub enum GateEvent {
    /// Request entered the gate
    Started { request_id: Uuid },
    /// Phase transition
    StateChanged {
        request_id: Uuid,
        from: GatePhase,
        to: GatePhase,
    },
    /// One dimension finished scoring; `degraded` marks a substituted
    /// neutral value
    ScoreReady {
        request_id: Uuid,
        dimension: ScoreDimension,
        value: f64,
        degraded: bool,
    },
    /// Verdict computed from the full score set
    VerdictReached {
        request_id: Uuid,
        accepted: bool,
        overall_score: f64,
    },
    /// Rejected query dispatched to an alternate handler
    Rerouted {
        request_id: Uuid,
        decision: RerouteDecision,
    },
    /// Terminal phase reached
    Completed { request_id: Uuid },
}

/// Output gate orchestrator
///
/// Shared across concurrent requests; each call to [`OutputGate::process`]
/// walks its own phase sequence. The synthesizer and router are optional
/// collaborators, and their absence only skips the corresponding step.
pub struct OutputGate {
    registry: Arc<AnalyzerRegistry>,
    aggregator: VerdictAggregator,
    filter: Arc<SensitiveContentFilter>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    router: Option<Arc<dyn QueryRouter>>,
    config: GateConfig,
    /// Event broadcaster
    event_tx: broadcast::Sender<GateEvent>,
}

impl OutputGate {
    /// Create a gate from its required collaborators
    ///
    /// Fails when the configured confidence threshold lies outside (0, 1];
    /// request processing never revalidates it.
    pub fn new(
        registry: Arc<AnalyzerRegistry>,
        filter: Arc<SensitiveContentFilter>,
        config: GateConfig,
    ) -> Result<Self> {
        let aggregator = VerdictAggregator::new(config.confidence_threshold)?;

        // Use larger capacity to avoid lagging slow receivers
        let (event_tx, _) = broadcast::channel(1000);

        Ok(Self {
            registry,
            aggregator,
            filter,
            synthesizer: None,
            router: None,
            config,
            event_tx,
        })
    }

    /// Create a gate with the standard component set
    ///
    /// Wires the four lexical analyzers and the pattern entity recognizer
    /// behind the sentence filter. When enabled in settings, the HTTP
    /// synthesizer (behind the retry wrapper) and the keyword router are
    /// attached as well; synthesis endpoints are health-probed here.
    pub async fn standard(settings: &Settings) -> Result<Self> {
        let registry = Arc::new(AnalyzerRegistry::standard(&settings.analysis));
        let filter = Arc::new(
            SensitiveContentFilter::new(
                Arc::new(RuleSentenceSplitter::new()),
                Arc::new(PatternEntityRecognizer::new()),
            )
            .with_sensitive_labels(settings.filter.sensitive_labels.clone()),
        );

        let mut gate = Self::new(registry, filter, settings.gate.clone())?;

        if settings.synthesis.enabled {
            let synthesizer = HttpSynthesizer::connect(settings.synthesis.clone()).await?;
            gate = gate.with_synthesizer(Arc::new(RetryingSynthesizer::new(
                Arc::new(synthesizer),
                settings.synthesis.retry.clone(),
            )));
        }

        if settings.routing.enabled {
            gate = gate.with_router(Arc::new(
                KeywordRouter::new().with_fallback(settings.routing.fallback_category),
            ));
        }

        Ok(gate)
    }

    /// Attach a speech synthesizer for accepted responses
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    pub fn has_synthesizer(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// Attach a query router for rejected responses
    pub fn with_router(mut self, router: Arc<dyn QueryRouter>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn has_router(&self) -> bool {
        self.router.is_some()
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.aggregator.confidence_threshold()
    }

    /// Subscribe to gate events
    pub fn subscribe(&self) -> broadcast::Receiver<GateEvent> {
        self.event_tx.subscribe()
    }

    /// Process one candidate response through the gate
    ///
    /// Returns the terminal outcome for every input; the only request-time
    /// error is a score set missing a dimension, which can happen solely
    /// with a registry that does not cover all four.
    pub async fn process(&self, request: &GateRequest) -> Result<GateOutcome> {
        let started = Instant::now();
        record_request();
        let _ = self.event_tx.send(GateEvent::Started {
            request_id: request.id,
        });
        tracing::debug!(
            "Gate request {} received ({} chars query, {} chars candidate)",
            request.id,
            request.query.len(),
            request.candidate.len()
        );

        let mut phase = GatePhase::Scoring;
        let scores = self.collect_scores(request).await;

        self.transition(request.id, &mut phase, GatePhase::Aggregating);
        let verdict = self.aggregator.aggregate(&scores)?;
        record_verdict(verdict.accepted);
        let _ = self.event_tx.send(GateEvent::VerdictReached {
            request_id: request.id,
            accepted: verdict.accepted,
            overall_score: verdict.overall_score,
        });

        let outcome = if verdict.accepted {
            self.admit(request, &mut phase, verdict).await
        } else {
            self.reroute(request, &mut phase, verdict).await
        };

        self.transition(request.id, &mut phase, GatePhase::Done);
        record_gate_latency(started.elapsed().as_secs_f64());
        let _ = self.event_tx.send(GateEvent::Completed {
            request_id: request.id,
        });

        Ok(outcome)
    }

    /// Score the candidate on every registered dimension
    ///
    /// All analyzers run concurrently under one timeout. A failed analyzer
    /// contributes the neutral score immediately; one still pending when
    /// the timeout fires is cancelled and degraded the same way. Scores
    /// that completed before the deadline always survive.
    async fn collect_scores(&self, request: &GateRequest) -> ScoreSet {
        let started = Instant::now();
        let analyzers = self.registry.all();
        let collected = Arc::new(Mutex::new(ScoreSet::new()));

        let scoring = analyzers.iter().map(|analyzer| {
            let analyzer = Arc::clone(analyzer);
            let collected = Arc::clone(&collected);
            let event_tx = self.event_tx.clone();
            let request_id = request.id;
            let query = request.query.as_str();
            let candidate = request.candidate.as_str();
            async move {
                let dimension = analyzer.dimension();
                let (value, degraded) = match analyzer.score(query, candidate).await {
                    Ok(value) => (value, false),
                    Err(err) => {
                        tracing::warn!(
                            "Analyzer {} failed: {} - substituting neutral score",
                            analyzer.name(),
                            err
                        );
                        record_analyzer_degraded(dimension);
                        (NEUTRAL_SCORE, true)
                    }
                };
                collected.lock().insert(dimension, value);
                let _ = event_tx.send(GateEvent::ScoreReady {
                    request_id,
                    dimension,
                    value,
                    degraded,
                });
            }
        });

        let timeout = Duration::from_millis(self.config.scoring_timeout_ms);
        if tokio::time::timeout(timeout, join_all(scoring)).await.is_err() {
            tracing::warn!(
                "Scoring timed out after {}ms - degrading pending dimensions",
                self.config.scoring_timeout_ms
            );
        }

        let mut scores = collected.lock().clone();
        for analyzer in &analyzers {
            let dimension = analyzer.dimension();
            if !scores.contains(dimension) {
                record_analyzer_degraded(dimension);
                scores.insert(dimension, NEUTRAL_SCORE);
                let _ = self.event_tx.send(GateEvent::ScoreReady {
                    request_id: request.id,
                    dimension,
                    value: NEUTRAL_SCORE,
                    degraded: true,
                });
            }
        }

        record_scoring_latency(started.elapsed().as_secs_f64());
        scores
    }

    async fn admit(
        &self,
        request: &GateRequest,
        phase: &mut GatePhase,
        verdict: Verdict,
    ) -> GateOutcome {
        tracing::info!("Candidate admitted (confidence: {:.2})", verdict.overall_score);

        self.transition(request.id, phase, GatePhase::Filtering);
        let filtered = self.filter.filter(&request.candidate).await;
        if filtered.len() < request.candidate.len() {
            tracing::debug!(
                "Content filter kept {} of {} chars",
                filtered.len(),
                request.candidate.len()
            );
        }

        self.transition(request.id, phase, GatePhase::Synthesizing);
        let audio = self.synthesize(request, &filtered).await;

        let outcome = GateOutcome::accepted(verdict.overall_score, filtered);
        match audio {
            Some(artifact) => outcome.with_audio(artifact),
            None => outcome,
        }
    }

    /// Synthesize the filtered text, or explain why not
    async fn synthesize(&self, request: &GateRequest, filtered: &str) -> Option<AudioArtifact> {
        let synthesizer = match &self.synthesizer {
            Some(synthesizer) => synthesizer,
            None => return None,
        };
        if !request.synthesize {
            tracing::debug!("Synthesis not requested for {}", request.id);
            return None;
        }
        if filtered.is_empty() {
            tracing::debug!("Nothing left to synthesize for {}", request.id);
            return None;
        }

        match synthesizer.synthesize(filtered).await {
            Ok(artifact) => {
                tracing::debug!(
                    "Synthesized {} bytes via {}",
                    artifact.len(),
                    synthesizer.backend_name()
                );
                Some(artifact)
            }
            Err(err) => {
                tracing::warn!("Speech synthesis failed: {} - returning text only", err);
                None
            }
        }
    }

    async fn reroute(
        &self,
        request: &GateRequest,
        phase: &mut GatePhase,
        verdict: Verdict,
    ) -> GateOutcome {
        tracing::info!(
            "Candidate rejected (confidence: {:.2} < {:.2})",
            verdict.overall_score,
            self.aggregator.confidence_threshold()
        );

        self.transition(request.id, phase, GatePhase::Rerouting);
        if let Some(router) = &self.router {
            match router.classify(&request.query).await {
                Ok(ranked) => {
                    let category = ranked
                        .first()
                        .copied()
                        .unwrap_or(RouteCategory::GeneralKnowledge);
                    tracing::info!("Routing query to {} handler: {}", category, request.query);
                    let decision = RerouteDecision::new(category, request.query.clone());
                    let _ = self.event_tx.send(GateEvent::Rerouted {
                        request_id: request.id,
                        decision,
                    });
                }
                Err(err) => {
                    tracing::warn!("Query routing failed: {} - rejection stands", err);
                }
            }
        }

        GateOutcome::rejected(verdict.overall_score)
    }

    fn transition(&self, request_id: Uuid, phase: &mut GatePhase, to: GatePhase) {
        let from = *phase;
        *phase = to;
        tracing::debug!("Gate {} phase: {} -> {}", request_id, from, to);
        let _ = self.event_tx.send(GateEvent::StateChanged {
            request_id,
            from,
            to,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use response_gate_core::{Error, ResponseAnalyzer};

    struct FixedAnalyzer {
        dimension: ScoreDimension,
        value: f64,
    }

    #[async_trait]
    impl ResponseAnalyzer for FixedAnalyzer {
        fn dimension(&self) -> ScoreDimension {
            self.dimension
        }

        async fn score(&self, _query: &str, _response: &str) -> Result<f64> {
            Ok(self.value)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingAnalyzer {
        dimension: ScoreDimension,
    }

    #[async_trait]
    impl ResponseAnalyzer for FailingAnalyzer {
        fn dimension(&self) -> ScoreDimension {
            self.dimension
        }

        async fn score(&self, _query: &str, _response: &str) -> Result<f64> {
            Err(Error::Analysis("scorer offline".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct SlowAnalyzer {
        dimension: ScoreDimension,
        delay_ms: u64,
        value: f64,
    }

    #[async_trait]
    impl ResponseAnalyzer for SlowAnalyzer {
        fn dimension(&self) -> ScoreDimension {
            self.dimension
        }

        async fn score(&self, _query: &str, _response: &str) -> Result<f64> {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            Ok(self.value)
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    fn fixed_registry(values: [f64; 4]) -> Arc<AnalyzerRegistry> {
        let mut registry = AnalyzerRegistry::new();
        for (dimension, value) in ScoreDimension::ALL.into_iter().zip(values) {
            registry = registry.with_analyzer(Arc::new(FixedAnalyzer { dimension, value }));
        }
        Arc::new(registry)
    }

    fn standard_filter() -> Arc<SensitiveContentFilter> {
        Arc::new(SensitiveContentFilter::new(
            Arc::new(RuleSentenceSplitter::new()),
            Arc::new(PatternEntityRecognizer::new()),
        ))
    }

    fn gate_config(threshold: f64) -> GateConfig {
        GateConfig {
            confidence_threshold: threshold,
            scoring_timeout_ms: 1_000,
        }
    }

    #[tokio::test]
    async fn test_mean_above_threshold_is_admitted() {
        let gate = OutputGate::new(
            fixed_registry([0.9, 0.8, 0.6, 0.7]),
            standard_filter(),
            gate_config(0.7),
        )
        .unwrap();

        let request = GateRequest::new("What is gravity?", "It rains today.").with_synthesis(false);
        let outcome = gate.process(&request).await.unwrap();

        assert!(outcome.accepted);
        assert!((outcome.overall_score - 0.75).abs() < 1e-9);
        assert_eq!(outcome.filtered_text.as_deref(), Some("It rains today."));
        assert!(outcome.audio.is_none());
    }

    #[tokio::test]
    async fn test_mean_below_threshold_is_rejected() {
        let gate = OutputGate::new(
            fixed_registry([0.9, 0.8, 0.6, 0.7]),
            standard_filter(),
            gate_config(0.76),
        )
        .unwrap();

        let request = GateRequest::new("What is gravity?", "It rains today.");
        let outcome = gate.process(&request).await.unwrap();

        assert!(!outcome.accepted);
        assert!((outcome.overall_score - 0.75).abs() < 1e-9);
        assert!(outcome.filtered_text.is_none());
        assert!(outcome.audio.is_none());
    }

    #[tokio::test]
    async fn test_failed_analyzer_degrades_to_neutral() {
        let mut registry = AnalyzerRegistry::new();
        for dimension in [
            ScoreDimension::Relevance,
            ScoreDimension::Sentiment,
            ScoreDimension::TopicCoherence,
        ] {
            registry = registry.with_analyzer(Arc::new(FixedAnalyzer { dimension, value: 0.9 }));
        }
        registry = registry.with_analyzer(Arc::new(FailingAnalyzer {
            dimension: ScoreDimension::FactualAccuracy,
        }));

        let gate =
            OutputGate::new(Arc::new(registry), standard_filter(), gate_config(0.7)).unwrap();
        let request = GateRequest::new("q", "It rains today.").with_synthesis(false);
        let outcome = gate.process(&request).await.unwrap();

        // (0.9 * 3 + 0.5) / 4
        assert!(outcome.accepted);
        assert!((outcome.overall_score - 0.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_scoring_timeout_degrades_pending_dimensions() {
        let mut registry = AnalyzerRegistry::new();
        for dimension in [
            ScoreDimension::Relevance,
            ScoreDimension::Sentiment,
            ScoreDimension::TopicCoherence,
        ] {
            registry = registry.with_analyzer(Arc::new(FixedAnalyzer { dimension, value: 0.9 }));
        }
        registry = registry.with_analyzer(Arc::new(SlowAnalyzer {
            dimension: ScoreDimension::FactualAccuracy,
            delay_ms: 5_000,
            value: 1.0,
        }));

        let config = GateConfig {
            confidence_threshold: 0.7,
            scoring_timeout_ms: 50,
        };
        let gate = OutputGate::new(Arc::new(registry), standard_filter(), config).unwrap();

        let request = GateRequest::new("q", "It rains today.").with_synthesis(false);
        let outcome = gate.process(&request).await.unwrap();

        // Fast dimensions keep their scores, the slow one degrades to 0.5
        assert!((outcome.overall_score - 0.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_invalid_threshold_rejected_at_construction() {
        let err = OutputGate::new(
            fixed_registry([0.9; 4]),
            standard_filter(),
            gate_config(0.0),
        );
        assert!(matches!(err, Err(Error::InvalidThreshold(_))));

        let err = OutputGate::new(
            fixed_registry([0.9; 4]),
            standard_filter(),
            gate_config(1.2),
        );
        assert!(matches!(err, Err(Error::InvalidThreshold(_))));
    }

    #[tokio::test]
    async fn test_incomplete_registry_is_fatal() {
        let registry = AnalyzerRegistry::new().with_analyzer(Arc::new(FixedAnalyzer {
            dimension: ScoreDimension::Relevance,
            value: 0.9,
        }));
        let gate =
            OutputGate::new(Arc::new(registry), standard_filter(), gate_config(0.7)).unwrap();

        let request = GateRequest::new("q", "c");
        let err = gate.process(&request).await;
        assert!(matches!(err, Err(Error::MissingScore(_))));
    }

    #[tokio::test]
    async fn test_optional_collaborators_default_absent() {
        let gate = OutputGate::new(
            fixed_registry([0.9; 4]),
            standard_filter(),
            gate_config(0.7),
        )
        .unwrap();

        assert!(!gate.has_synthesizer());
        assert!(!gate.has_router());
        assert_eq!(gate.confidence_threshold(), 0.7);
    }
}
