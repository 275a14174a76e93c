//! Core traits and types for the response gate
//!
//! This crate provides the foundational pieces used across all other
//! crates:
//! - Score types and the verdict aggregator
//! - Collaborator traits for pluggable backends (analyzers, classifiers,
//!   synthesis, routing)
//! - Request and outcome types
//! - Error types

pub mod entity;
pub mod error;
pub mod outcome;
pub mod request;
pub mod score;
pub mod traits;
pub mod verdict;

pub use entity::EntityLabel;
pub use error::{Error, Result};
pub use outcome::{AudioArtifact, AudioFormat, GateOutcome, RerouteDecision, RouteCategory};
pub use request::GateRequest;
pub use score::{ScoreDimension, ScoreSet};
pub use verdict::{Verdict, VerdictAggregator};

// Trait re-exports
pub use traits::{
    EntityRecognizer,
    FactualityModel,
    QueryRouter,
    // Scoring
    ResponseAnalyzer,
    SentenceSplitter,
    SentimentClassifier,
    SentimentLabel,
    SentimentPrediction,
    // Output
    SpeechSynthesizer,
    TopicModel,
    TopicWeight,
};
