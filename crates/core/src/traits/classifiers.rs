//! Classifier traits consumed by the scoring analyzers

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sentiment polarity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifier output: polarity plus confidence in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl SentimentPrediction {
    pub fn new(label: SentimentLabel, confidence: f64) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Map to a positivity score: positive confidence passes through,
    /// negative confidence inverts.
    pub fn positivity(&self) -> f64 {
        match self.label {
            SentimentLabel::Positive => self.confidence,
            SentimentLabel::Negative => 1.0 - self.confidence,
        }
    }
}

/// Sentiment classifier boundary
#[async_trait]
pub trait SentimentClassifier: Send + Sync + 'static {
    async fn classify(&self, text: &str) -> Result<SentimentPrediction>;

    /// Model name for logging
    fn model_name(&self) -> &str;
}

/// Topic id with its weight for one document
pub type TopicWeight = (usize, f64);

/// Unsupervised topic model fit jointly over a small corpus
///
/// Fitting happens per call on the documents given; nothing is retained
/// between calls. The output is one `(topic_id, weight)` list per input
/// document, aligned with input order.
pub trait TopicModel: Send + Sync + 'static {
    fn fit_topics(&self, documents: &[&str]) -> Result<Vec<Vec<TopicWeight>>>;

    /// Number of topics the model partitions into
    fn topic_count(&self) -> usize;

    /// Model name for logging
    fn model_name(&self) -> &str;
}

/// Binary factuality classifier boundary
#[async_trait]
pub trait FactualityModel: Send + Sync + 'static {
    /// Probability in [0, 1] that the text is factual
    async fn probability_factual(&self, text: &str) -> Result<f64>;

    /// Model name for logging
    fn model_name(&self) -> &str;
}
