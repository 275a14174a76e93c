//! Analyzer registry shared across requests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::factuality::{FactualAccuracyScorer, HeuristicFactualityModel};
use crate::relevance::LexicalRelevanceScorer;
use crate::sentiment::{LexiconSentimentClassifier, SentimentPositivityScorer};
use crate::topic::{CooccurrenceTopicModel, TopicCoherenceScorer};
use response_gate_config::AnalysisConfig;
use response_gate_core::{ResponseAnalyzer, Result, ScoreDimension};

/// Process-wide analyzer set, read-only after construction
///
/// Built once at startup and shared behind `Arc`; concurrent requests
/// borrow analyzer references and never mutate them. One analyzer per
/// dimension; registering a second for the same dimension replaces the
/// first.
pub struct AnalyzerRegistry {
    analyzers: HashMap<ScoreDimension, Arc<dyn ResponseAnalyzer>>,
}

impl AnalyzerRegistry {
    /// Empty registry; populate with [`AnalyzerRegistry::with_analyzer`]
    pub fn new() -> Self {
        Self {
            analyzers: HashMap::new(),
        }
    }

    /// Registry over the in-tree deterministic analyzers
    pub fn standard(config: &AnalysisConfig) -> Self {
        let registry = Self::new()
            .with_analyzer(Arc::new(LexicalRelevanceScorer::new()))
            .with_analyzer(Arc::new(SentimentPositivityScorer::new(Arc::new(
                LexiconSentimentClassifier::new(),
            ))))
            .with_analyzer(Arc::new(TopicCoherenceScorer::new(
                Arc::new(CooccurrenceTopicModel::new(config.topic_count)),
                config.dominant_topic_min_weight,
            )))
            .with_analyzer(Arc::new(FactualAccuracyScorer::new(Arc::new(
                HeuristicFactualityModel::new(),
            ))));

        tracing::debug!(
            topic_count = config.topic_count,
            "Standard analyzer registry created"
        );
        registry
    }

    /// Register an analyzer under its own dimension
    pub fn with_analyzer(mut self, analyzer: Arc<dyn ResponseAnalyzer>) -> Self {
        self.analyzers.insert(analyzer.dimension(), analyzer);
        self
    }

    pub fn get(&self, dimension: ScoreDimension) -> Option<Arc<dyn ResponseAnalyzer>> {
        self.analyzers.get(&dimension).cloned()
    }

    /// Registered analyzers in canonical dimension order
    pub fn all(&self) -> Vec<Arc<dyn ResponseAnalyzer>> {
        ScoreDimension::ALL
            .iter()
            .filter_map(|d| self.analyzers.get(d).cloned())
            .collect()
    }

    /// True once every dimension has an analyzer
    pub fn is_complete(&self) -> bool {
        ScoreDimension::ALL
            .iter()
            .all(|d| self.analyzers.contains_key(d))
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes access to a non-reentrant analyzer
///
/// Wrap an analyzer whose backing model cannot take concurrent calls; the
/// mutex covers this instance only, so the other dimensions keep scoring
/// unblocked.
pub struct SerializedAnalyzer<A> {
    inner: A,
    lock: tokio::sync::Mutex<()>,
}

impl<A: ResponseAnalyzer> SerializedAnalyzer<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            lock: tokio::sync::Mutex::new(()),
        }
    }
}

#[async_trait]
impl<A: ResponseAnalyzer> ResponseAnalyzer for SerializedAnalyzer<A> {
    fn dimension(&self) -> ScoreDimension {
        self.inner.dimension()
    }

    async fn score(&self, query: &str, response: &str) -> Result<f64> {
        let _guard = self.lock.lock().await;
        self.inner.score(query, response).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_standard_registry_is_complete() {
        let registry = AnalyzerRegistry::standard(&AnalysisConfig::default());
        assert!(registry.is_complete());
        assert_eq!(registry.len(), 4);

        for dimension in ScoreDimension::ALL {
            let analyzer = registry.get(dimension).unwrap();
            assert_eq!(analyzer.dimension(), dimension);
        }
    }

    #[test]
    fn test_all_returns_canonical_order() {
        let registry = AnalyzerRegistry::standard(&AnalysisConfig::default());
        let dimensions: Vec<ScoreDimension> =
            registry.all().iter().map(|a| a.dimension()).collect();
        assert_eq!(dimensions, ScoreDimension::ALL.to_vec());
    }

    #[test]
    fn test_partial_registry_reports_incomplete() {
        let registry =
            AnalyzerRegistry::new().with_analyzer(Arc::new(LexicalRelevanceScorer::new()));
        assert!(!registry.is_complete());
        assert_eq!(registry.len(), 1);
        assert!(registry.get(ScoreDimension::Sentiment).is_none());
    }

    #[test]
    fn test_replacing_analyzer_keeps_one_per_dimension() {
        let registry = AnalyzerRegistry::new()
            .with_analyzer(Arc::new(LexicalRelevanceScorer::new()))
            .with_analyzer(Arc::new(LexicalRelevanceScorer::new()));
        assert_eq!(registry.len(), 1);
    }

    struct SlowAnalyzer {
        in_flight: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ResponseAnalyzer for SlowAnalyzer {
        fn dimension(&self) -> ScoreDimension {
            ScoreDimension::FactualAccuracy
        }

        async fn score(&self, _query: &str, _response: &str) -> Result<f64> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(0.5)
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_serialized_analyzer_never_overlaps() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let analyzer = Arc::new(SerializedAnalyzer::new(SlowAnalyzer {
            in_flight: in_flight.clone(),
            peak: peak.clone(),
        }));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let analyzer = analyzer.clone();
            handles.push(tokio::spawn(async move {
                analyzer.score("q", "r").await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }
}
