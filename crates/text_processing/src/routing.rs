//! Keyword routing of rejected queries

use async_trait::async_trait;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

use response_gate_core::{QueryRouter, Result, RouteCategory};

/// Cue phrases per category; categories listed in canonical order so
/// equal scores rank deterministically
const CATEGORY_CUES: &[(RouteCategory, &[&str])] = &[
    (
        RouteCategory::GeneralKnowledge,
        &[
            "who is",
            "what is",
            "when did",
            "where is",
            "why does",
            "how does",
            "tell me about",
            "history",
            "capital",
            "definition",
            "meaning",
            "president",
            "population",
            "weather",
        ],
    ),
    (
        RouteCategory::TechnicalSupport,
        &[
            "error",
            "bug",
            "crash",
            "not working",
            "install",
            "update",
            "reset my password",
            "login",
            "connect",
            "configure",
            "troubleshoot",
            "restart",
            "broken",
        ],
    ),
    (
        RouteCategory::CustomerService,
        &[
            "refund",
            "order status",
            "cancel my order",
            "delivery",
            "billing",
            "account",
            "complaint",
            "subscription",
            "invoice",
            "payment failed",
            "speak to an agent",
            "return",
        ],
    ),
    (
        RouteCategory::ProductInquiry,
        &[
            "price",
            "cost",
            "how much",
            "features",
            "in stock",
            "available",
            "warranty",
            "compare",
            "model",
            "specifications",
            "discount",
            "purchase",
        ],
    ),
];

/// Ranks the fixed route categories by cue matching
///
/// Scoring per cue: exact query match 1.0, phrase containment 0.9, word
/// overlap scaled to 0.8; a category scores the maximum over its cues.
/// A query matching nothing ranks the configured fallback first.
pub struct KeywordRouter {
    fallback: RouteCategory,
}

impl Default for KeywordRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordRouter {
    pub fn new() -> Self {
        Self {
            fallback: RouteCategory::GeneralKnowledge,
        }
    }

    /// Set the category ranked first when nothing matches (builder)
    pub fn with_fallback(mut self, category: RouteCategory) -> Self {
        self.fallback = category;
        self
    }

    fn category_score(text: &str, words: &HashSet<&str>, cues: &[&str]) -> f64 {
        let mut score: f64 = 0.0;
        for cue in cues {
            if text == *cue {
                return 1.0;
            }
            if cue.contains(' ') && text.contains(cue) {
                score = score.max(0.9);
                continue;
            }
            let cue_words: Vec<&str> = cue.unicode_words().collect();
            let overlap = cue_words.iter().filter(|w| words.contains(**w)).count();
            if overlap > 0 {
                score = score.max(overlap as f64 / cue_words.len().max(1) as f64 * 0.8);
            }
        }
        score
    }
}

#[async_trait]
impl QueryRouter for KeywordRouter {
    async fn classify(&self, query: &str) -> Result<Vec<RouteCategory>> {
        let text = query.to_lowercase();
        let words: HashSet<&str> = text.unicode_words().collect();

        let mut scores: Vec<(RouteCategory, f64)> = CATEGORY_CUES
            .iter()
            .map(|(category, cues)| (*category, Self::category_score(&text, &words, cues)))
            .collect();
        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let best = scores.first().map(|(_, score)| *score).unwrap_or(0.0);
        if best <= 0.0 {
            let mut ranked = vec![self.fallback];
            ranked.extend(
                RouteCategory::ALL
                    .iter()
                    .copied()
                    .filter(|category| *category != self.fallback),
            );
            return Ok(ranked);
        }

        Ok(scores.into_iter().map(|(category, _)| category).collect())
    }

    fn name(&self) -> &str {
        "keyword-router"
    }
}
