//! Collaborator traits for the response gate
//!
//! Every external capability the gate composes is expressed as a trait so
//! backends can be swapped without code changes and tests can run against
//! scripted fakes:
//!
//! ```text
//! Scoring:
//!   - ResponseAnalyzer: (query, response) -> score in [0, 1]
//!   - SentimentClassifier: text -> polarity label + confidence
//!   - TopicModel: small corpus -> per-document topic weights
//!   - FactualityModel: text -> probability factual
//!
//! Filtering:
//!   - SentenceSplitter: text -> ordered sentences
//!   - EntityRecognizer: sentence -> entity labels
//!
//! Output:
//!   - SpeechSynthesizer: text -> audio artifact
//!   - QueryRouter: query -> ranked reroute categories
//! ```

mod analyzer;
mod classifiers;
mod routing;
mod speech;
mod text;

pub use analyzer::ResponseAnalyzer;
pub use classifiers::{
    FactualityModel, SentimentClassifier, SentimentLabel, SentimentPrediction, TopicModel,
    TopicWeight,
};
pub use routing::QueryRouter;
pub use speech::SpeechSynthesizer;
pub use text::{EntityRecognizer, SentenceSplitter};
