//! Text processing traits used by the content filter

use crate::entity::EntityLabel;
use crate::error::Result;
use async_trait::async_trait;

/// Sentence boundary detection
pub trait SentenceSplitter: Send + Sync + 'static {
    /// Split text into sentences, preserving order
    fn split(&self, text: &str) -> Vec<String>;
}

/// Named-entity recognition over a single sentence
#[async_trait]
pub trait EntityRecognizer: Send + Sync + 'static {
    /// Labels of all entities detected in the sentence
    async fn recognize(&self, sentence: &str) -> Result<Vec<EntityLabel>>;

    /// Recognizer name for logging
    fn name(&self) -> &str;
}
