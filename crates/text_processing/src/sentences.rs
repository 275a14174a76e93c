//! Sentence splitting on Unicode boundaries

use response_gate_core::SentenceSplitter;
use unicode_segmentation::UnicodeSegmentation;

/// Splits text into sentences using UAX #29 sentence boundaries
///
/// Boundary detection handles abbreviations ("Dr. Smith") and decimal
/// points without splitting mid-sentence. Leading and trailing whitespace
/// is trimmed from each sentence; empty segments are dropped.
#[derive(Debug, Default, Clone)]
pub struct RuleSentenceSplitter;

impl RuleSentenceSplitter {
    pub fn new() -> Self {
        Self
    }
}

impl SentenceSplitter for RuleSentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        text.unicode_sentences()
            .map(|sentence| sentence.trim().to_string())
            .filter(|sentence| !sentence.is_empty())
            .collect()
    }
}
