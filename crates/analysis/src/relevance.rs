//! Lexical relevance scoring

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};

use crate::tokenize::tokenize;
use response_gate_core::{ResponseAnalyzer, Result, ScoreDimension};

/// TF-IDF cosine similarity between query and response
///
/// The two texts form their own two-document corpus; term weights use the
/// smoothed inverse document frequency over that corpus. Shared vocabulary
/// pulls the score toward 1.0, disjoint vocabulary toward 0.0, and adding
/// more of the query's distinctive terms to the response never lowers it.
#[derive(Debug, Default)]
pub struct LexicalRelevanceScorer;

impl LexicalRelevanceScorer {
    pub fn new() -> Self {
        Self
    }

    fn term_counts(tokens: &[String]) -> HashMap<&str, f64> {
        let mut counts: HashMap<&str, f64> = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_str()).or_insert(0.0) += 1.0;
        }
        counts
    }

    fn tfidf_cosine(query: &str, response: &str) -> f64 {
        let query_tokens = tokenize(query);
        let response_tokens = tokenize(response);
        if query_tokens.is_empty() || response_tokens.is_empty() {
            return 0.0;
        }

        let query_tf = Self::term_counts(&query_tokens);
        let response_tf = Self::term_counts(&response_tokens);

        let vocabulary: BTreeSet<&str> = query_tf
            .keys()
            .chain(response_tf.keys())
            .copied()
            .collect();

        // Smoothed idf over the two-document corpus
        let n_docs = 2.0;
        let mut dot = 0.0;
        let mut query_norm = 0.0;
        let mut response_norm = 0.0;
        for term in vocabulary {
            let in_query = query_tf.get(term).copied().unwrap_or(0.0);
            let in_response = response_tf.get(term).copied().unwrap_or(0.0);
            let df = (in_query > 0.0) as u8 + (in_response > 0.0) as u8;
            let idf = ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0;

            let query_weight = in_query * idf;
            let response_weight = in_response * idf;
            dot += query_weight * response_weight;
            query_norm += query_weight * query_weight;
            response_norm += response_weight * response_weight;
        }

        if query_norm == 0.0 || response_norm == 0.0 {
            return 0.0;
        }

        (dot / (query_norm.sqrt() * response_norm.sqrt())).clamp(0.0, 1.0)
    }
}

#[async_trait]
impl ResponseAnalyzer for LexicalRelevanceScorer {
    fn dimension(&self) -> ScoreDimension {
        ScoreDimension::Relevance
    }

    async fn score(&self, query: &str, response: &str) -> Result<f64> {
        Ok(Self::tfidf_cosine(query, response))
    }

    fn name(&self) -> &str {
        "tfidf-cosine"
    }
}
