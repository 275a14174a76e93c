//! Response analysis for the output gate
//!
//! Deterministic scorers behind the `ResponseAnalyzer` trait, one per
//! dimension:
//! - Relevance: TF-IDF cosine similarity between query and response
//! - Sentiment: cue-lexicon polarity mapped to a positivity score
//! - Topic coherence: Jaccard overlap of dominant topic buckets
//! - Factual accuracy: hedge and citation cue heuristic
//!
//! All four are pure functions of their input text, so scores are
//! reproducible across runs and safe to share between concurrent
//! requests without locking.

pub mod factuality;
pub mod registry;
pub mod relevance;
pub mod sentiment;
pub mod tokenize;
pub mod topic;

pub use factuality::{FactualAccuracyScorer, HeuristicFactualityModel};
pub use registry::{AnalyzerRegistry, SerializedAnalyzer};
pub use relevance::LexicalRelevanceScorer;
pub use sentiment::{LexiconSentimentClassifier, SentimentPositivityScorer};
pub use topic::{CooccurrenceTopicModel, TopicCoherenceScorer};

use thiserror::Error;

/// Analysis errors
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
}

impl From<AnalysisError> for response_gate_core::Error {
    fn from(err: AnalysisError) -> Self {
        response_gate_core::Error::Analysis(err.to_string())
    }
}
