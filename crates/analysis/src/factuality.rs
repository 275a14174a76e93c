//! Factual accuracy scoring

use async_trait::async_trait;
use std::sync::Arc;

use response_gate_core::{FactualityModel, ResponseAnalyzer, Result, ScoreDimension};

/// Hedging cues that lower the factuality estimate
const HEDGE_CUES: &[&str] = &[
    "maybe",
    "perhaps",
    "possibly",
    "probably",
    "might",
    "i think",
    "i believe",
    "i guess",
    "not sure",
    "allegedly",
    "supposedly",
    "apparently",
    "it seems",
    "rumor",
    "some say",
];

/// Assertive cues that raise the factuality estimate
const ASSERTIVE_CUES: &[&str] = &[
    "according to",
    "measured",
    "recorded",
    "documented",
    "published",
    "confirmed",
    "verified",
    "officially",
    "census",
    "study",
    "research",
];

/// Cue-based factuality estimate
///
/// Starts from a mildly confident prior and moves with hedging and
/// sourcing cues. The estimate stays inside (0, 1): this model is never
/// certain either way.
#[derive(Debug, Default)]
pub struct HeuristicFactualityModel;

impl HeuristicFactualityModel {
    pub fn new() -> Self {
        Self
    }

    fn cue_count(text: &str, cues: &[&str]) -> usize {
        cues.iter().filter(|cue| text.contains(*cue)).count()
    }
}

#[async_trait]
impl FactualityModel for HeuristicFactualityModel {
    async fn probability_factual(&self, text: &str) -> Result<f64> {
        let lowered = text.to_lowercase();
        let hedges = Self::cue_count(&lowered, HEDGE_CUES) as f64;
        let assertive = Self::cue_count(&lowered, ASSERTIVE_CUES) as f64;

        let estimate = 0.55 + 0.1 * assertive - 0.15 * hedges;
        Ok(estimate.clamp(0.05, 0.95))
    }

    fn model_name(&self) -> &str {
        "cue-heuristic"
    }
}

/// Wraps a factuality model as the factual-accuracy analyzer
pub struct FactualAccuracyScorer {
    model: Arc<dyn FactualityModel>,
}

impl FactualAccuracyScorer {
    pub fn new(model: Arc<dyn FactualityModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl ResponseAnalyzer for FactualAccuracyScorer {
    fn dimension(&self) -> ScoreDimension {
        ScoreDimension::FactualAccuracy
    }

    async fn score(&self, _query: &str, response: &str) -> Result<f64> {
        let probability = self.model.probability_factual(response).await?;
        Ok(probability.clamp(0.0, 1.0))
    }

    fn name(&self) -> &str {
        "factual-accuracy"
    }
}
