//! Sentence-level redaction of sensitive content

use std::collections::HashSet;
use std::sync::Arc;

use response_gate_core::{EntityLabel, EntityRecognizer, SentenceSplitter};

/// Removes whole sentences that mention sensitive entities
///
/// The unit of removal is the sentence: a sentence is kept whole or
/// dropped whole, never partially rewritten. Survivors are rejoined with
/// single spaces in their original order, so the output is a subsequence
/// of the input and filtering is idempotent. A sentence the recognizer
/// cannot process is dropped.
pub struct SensitiveContentFilter {
    splitter: Arc<dyn SentenceSplitter>,
    recognizer: Arc<dyn EntityRecognizer>,
    sensitive: HashSet<EntityLabel>,
}

impl SensitiveContentFilter {
    /// Filter over the default sensitive label set
    pub fn new(splitter: Arc<dyn SentenceSplitter>, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            splitter,
            recognizer,
            sensitive: EntityLabel::SENSITIVE.iter().copied().collect(),
        }
    }

    /// Replace the sensitive label set (builder)
    pub fn with_sensitive_labels(mut self, labels: Vec<EntityLabel>) -> Self {
        self.sensitive = labels.into_iter().collect();
        self
    }

    pub fn sensitive_labels(&self) -> &HashSet<EntityLabel> {
        &self.sensitive
    }

    /// Drop sensitive sentences and rejoin the rest
    ///
    /// Returns the empty string when every sentence is dropped; the caller
    /// decides what an empty result means.
    pub async fn filter(&self, text: &str) -> String {
        let mut kept = Vec::new();
        for sentence in self.splitter.split(text) {
            match self.recognizer.recognize(&sentence).await {
                Ok(found) => {
                    if found.iter().any(|label| self.sensitive.contains(label)) {
                        tracing::debug!(labels = ?found, "Dropping sentence with sensitive entities");
                    } else {
                        kept.push(sentence);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Entity recognition failed, dropping sentence");
                }
            }
        }
        kept.join(" ")
    }
}
