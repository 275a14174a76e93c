//! Sentiment positivity scoring

use async_trait::async_trait;
use std::sync::Arc;

use crate::tokenize::tokenize;
use response_gate_core::{
    ResponseAnalyzer, Result, ScoreDimension, SentimentClassifier, SentimentLabel,
    SentimentPrediction,
};

/// Positive cue words for the lexicon classifier
const POSITIVE_CUES: &[&str] = &[
    "good", "great", "excellent", "happy", "glad", "helpful", "wonderful", "best", "love",
    "perfect", "thanks", "thank", "pleased", "easy", "success", "successful", "reliable", "clear",
    "correct", "yes", "sure", "certainly", "absolutely", "improved", "fast",
];

/// Negative cue words for the lexicon classifier
const NEGATIVE_CUES: &[&str] = &[
    "bad", "terrible", "awful", "sad", "angry", "unhelpful", "worst", "hate", "wrong", "broken",
    "fail", "failed", "failure", "slow", "problem", "error", "unfortunately", "no", "never",
    "cannot", "unreliable", "poor", "difficult", "confusing", "useless",
];

/// Cue-lexicon sentiment classifier
///
/// Counts positive and negative cue hits over the token stream. Confidence
/// grows with the margin between the two counts; a text with no cues at
/// all is a neutral positive at confidence 0.5.
#[derive(Debug, Default)]
pub struct LexiconSentimentClassifier;

impl LexiconSentimentClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SentimentClassifier for LexiconSentimentClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentPrediction> {
        let tokens = tokenize(text);

        let positive = tokens
            .iter()
            .filter(|t| POSITIVE_CUES.contains(&t.as_str()))
            .count() as f64;
        let negative = tokens
            .iter()
            .filter(|t| NEGATIVE_CUES.contains(&t.as_str()))
            .count() as f64;

        let total = positive + negative;
        if total == 0.0 {
            return Ok(SentimentPrediction::new(SentimentLabel::Positive, 0.5));
        }

        let label = if positive >= negative {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };
        let confidence = 0.5 + 0.5 * ((positive - negative).abs() / total);

        Ok(SentimentPrediction::new(label, confidence))
    }

    fn model_name(&self) -> &str {
        "cue-lexicon"
    }
}

/// Maps a sentiment classification to the positivity dimension
///
/// Positive confidence passes through; negative confidence inverts to
/// `1 - confidence`, so a strongly negative response scores near zero.
pub struct SentimentPositivityScorer {
    classifier: Arc<dyn SentimentClassifier>,
}

impl SentimentPositivityScorer {
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl ResponseAnalyzer for SentimentPositivityScorer {
    fn dimension(&self) -> ScoreDimension {
        ScoreDimension::Sentiment
    }

    async fn score(&self, _query: &str, response: &str) -> Result<f64> {
        let prediction = self.classifier.classify(response).await?;
        Ok(prediction.positivity())
    }

    fn name(&self) -> &str {
        "sentiment-positivity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> SentimentPositivityScorer {
        SentimentPositivityScorer::new(Arc::new(LexiconSentimentClassifier::new()))
    }

    #[tokio::test]
    async fn test_positive_text_scores_high() {
        let score = scorer()
            .score("", "Great news, the upgrade was a complete success and works perfectly.")
            .await
            .unwrap();
        assert!(score > 0.7);
    }

    #[tokio::test]
    async fn test_negative_text_scores_low() {
        let score = scorer()
            .score("", "Unfortunately the service is broken and the error never goes away.")
            .await
            .unwrap();
        assert!(score < 0.3);
    }

    #[tokio::test]
    async fn test_neutral_text_scores_half() {
        let score = scorer()
            .score("", "The train departs from platform nine.")
            .await
            .unwrap();
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_negative_confidence_inverts() {
        let classifier = LexiconSentimentClassifier::new();
        let prediction = classifier
            .classify("terrible awful broken failure")
            .await
            .unwrap();
        assert_eq!(prediction.label, SentimentLabel::Negative);
        assert_eq!(prediction.confidence, 1.0);
        assert_eq!(prediction.positivity(), 0.0);
    }

    #[tokio::test]
    async fn test_mixed_text_has_moderate_confidence() {
        let classifier = LexiconSentimentClassifier::new();
        let prediction = classifier
            .classify("the good parts are great but the slow startup is a problem")
            .await
            .unwrap();
        assert!(prediction.confidence < 1.0);
        assert!(prediction.confidence >= 0.5);
    }
}
