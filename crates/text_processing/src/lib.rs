//! Text processing for the response gate
//!
//! This crate provides the text-side collaborators of the gate:
//! - **Sentence splitting**: Unicode sentence boundaries (UAX #29)
//! - **Entity recognition**: pattern and gazetteer detection of people,
//!   organizations, places, money amounts, card and social security numbers
//! - **Redaction**: sentence-level removal of sensitive content
//! - **Query routing**: keyword classification of rejected queries
//!
//! # Example
//!
//! ```ignore
//! use response_gate_text_processing::{
//!     PatternEntityRecognizer, RuleSentenceSplitter, SensitiveContentFilter,
//! };
//! use std::sync::Arc;
//!
//! let filter = SensitiveContentFilter::new(
//!     Arc::new(RuleSentenceSplitter::new()),
//!     Arc::new(PatternEntityRecognizer::new()),
//! );
//! let clean = filter.filter("The president is John Smith. It rains today.").await;
//! assert_eq!(clean, "It rains today.");
//! ```

pub mod entities;
pub mod redaction;
pub mod routing;
pub mod sentences;

pub use entities::{EntityMatch, PatternEntityRecognizer};
pub use redaction::SensitiveContentFilter;
pub use routing::KeywordRouter;
pub use sentences::RuleSentenceSplitter;

use thiserror::Error;

/// Text processing errors
#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Recognition error: {0}")]
    Recognition(String),
}

impl From<TextProcessingError> for response_gate_core::Error {
    fn from(err: TextProcessingError) -> Self {
        response_gate_core::Error::TextProcessing(err.to_string())
    }
}
