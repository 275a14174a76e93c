//! Topic coherence scoring

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::tokenize::content_tokens;
use crate::AnalysisError;
use response_gate_core::{ResponseAnalyzer, Result, ScoreDimension, TopicModel, TopicWeight};

/// Deterministic co-occurrence topic model
///
/// Partitions the corpus vocabulary into a fixed number of topic buckets
/// with a stable string hash and weights each document's topics by term
/// share. Deterministic across runs and platforms, which keeps gate
/// decisions reproducible.
#[derive(Debug, Clone)]
pub struct CooccurrenceTopicModel {
    topic_count: usize,
}

impl CooccurrenceTopicModel {
    pub fn new(topic_count: usize) -> Self {
        Self {
            topic_count: topic_count.max(1),
        }
    }

    // FNV-1a; stable, no RandomState
    fn topic_of(&self, term: &str) -> usize {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in term.bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        (hash % self.topic_count as u64) as usize
    }
}

impl TopicModel for CooccurrenceTopicModel {
    fn fit_topics(&self, documents: &[&str]) -> Result<Vec<Vec<TopicWeight>>> {
        let mut per_document = Vec::with_capacity(documents.len());

        for document in documents {
            let tokens = content_tokens(document);
            if tokens.is_empty() {
                per_document.push(Vec::new());
                continue;
            }

            let total = tokens.len() as f64;
            let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
            for token in &tokens {
                *counts.entry(self.topic_of(token)).or_insert(0.0) += 1.0;
            }

            per_document.push(
                counts
                    .into_iter()
                    .map(|(topic, count)| (topic, count / total))
                    .collect(),
            );
        }

        Ok(per_document)
    }

    fn topic_count(&self) -> usize {
        self.topic_count
    }

    fn model_name(&self) -> &str {
        "cooccurrence-hash"
    }
}

/// Jaccard overlap of the dominant topic sets of query and response
///
/// The model is fit jointly on both texts per request; a topic counts as
/// dominant for a document when its weight reaches `min_weight`. An empty
/// union scores 0.0.
pub struct TopicCoherenceScorer {
    model: Arc<dyn TopicModel>,
    min_weight: f64,
}

impl TopicCoherenceScorer {
    pub fn new(model: Arc<dyn TopicModel>, min_weight: f64) -> Self {
        Self { model, min_weight }
    }

    fn dominant(&self, weights: &[TopicWeight]) -> BTreeSet<usize> {
        weights
            .iter()
            .filter(|(_, weight)| *weight >= self.min_weight)
            .map(|(topic, _)| *topic)
            .collect()
    }
}

#[async_trait]
impl ResponseAnalyzer for TopicCoherenceScorer {
    fn dimension(&self) -> ScoreDimension {
        ScoreDimension::TopicCoherence
    }

    async fn score(&self, query: &str, response: &str) -> Result<f64> {
        let topics = self.model.fit_topics(&[query, response])?;
        if topics.len() != 2 {
            return Err(AnalysisError::Model(format!(
                "Topic model returned {} documents, expected 2",
                topics.len()
            ))
            .into());
        }

        let query_topics = self.dominant(&topics[0]);
        let response_topics = self.dominant(&topics[1]);

        let union = query_topics.union(&response_topics).count();
        if union == 0 {
            return Ok(0.0);
        }
        let shared = query_topics.intersection(&response_topics).count();

        Ok(shared as f64 / union as f64)
    }

    fn name(&self) -> &str {
        "topic-jaccard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer(topic_count: usize, min_weight: f64) -> TopicCoherenceScorer {
        TopicCoherenceScorer::new(Arc::new(CooccurrenceTopicModel::new(topic_count)), min_weight)
    }

    #[test]
    fn test_topic_assignment_is_deterministic() {
        let model = CooccurrenceTopicModel::new(5);
        assert_eq!(model.topic_of("paris"), model.topic_of("paris"));

        let first = model.fit_topics(&["solar panels convert sunlight"]).unwrap();
        let second = model.fit_topics(&["solar panels convert sunlight"]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let model = CooccurrenceTopicModel::new(5);
        let topics = model
            .fit_topics(&["solar panels convert sunlight into electricity efficiently"])
            .unwrap();
        let sum: f64 = topics[0].iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_identical_texts_share_all_topics() {
        let text = "solar panels convert sunlight into electricity";
        let score = scorer(5, 0.1).score(text, text).await.unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_union_scores_zero() {
        // Stop words only, so no content tokens and no dominant topics
        let score = scorer(5, 0.25).score("the and of", "a but to").await.unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_score_within_unit_interval() {
        let score = scorer(5, 0.25)
            .score(
                "how do solar panels work",
                "photovoltaic cells absorb photons and release electrons",
            )
            .await
            .unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[tokio::test]
    async fn test_single_bucket_model_always_coheres() {
        // Every term lands in the same topic, so any two non-empty texts overlap fully
        let score = scorer(1, 0.5)
            .score("completely different words", "another unrelated sentence")
            .await
            .unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }
}
