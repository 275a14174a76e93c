//! Score types produced by the response analyzers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Quality dimension measured by one analyzer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDimension {
    /// Lexical similarity between query and response
    Relevance,
    /// Positivity of the response tone
    Sentiment,
    /// Overlap between the dominant topic sets of query and response
    TopicCoherence,
    /// Probability that the response is factual
    FactualAccuracy,
}

impl ScoreDimension {
    /// All dimensions in canonical order
    pub const ALL: [ScoreDimension; 4] = [
        ScoreDimension::Relevance,
        ScoreDimension::Sentiment,
        ScoreDimension::TopicCoherence,
        ScoreDimension::FactualAccuracy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreDimension::Relevance => "relevance",
            ScoreDimension::Sentiment => "sentiment",
            ScoreDimension::TopicCoherence => "topic_coherence",
            ScoreDimension::FactualAccuracy => "factual_accuracy",
        }
    }
}

impl std::fmt::Display for ScoreDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-request score collection, at most one value per dimension
///
/// Values are clamped to [0, 1] on insert so a misbehaving analyzer can
/// never push an out-of-range score into aggregation. A dimension that was
/// never inserted stays absent; reading it through [`ScoreSet::require`]
/// yields an error rather than a silent zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    scores: BTreeMap<ScoreDimension, f64>,
}

impl ScoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dimension score, clamped to [0, 1]
    pub fn insert(&mut self, dimension: ScoreDimension, value: f64) {
        self.scores.insert(dimension, value.clamp(0.0, 1.0));
    }

    pub fn get(&self, dimension: ScoreDimension) -> Option<f64> {
        self.scores.get(&dimension).copied()
    }

    /// Read a dimension that must be present
    pub fn require(&self, dimension: ScoreDimension) -> Result<f64> {
        self.get(dimension).ok_or(Error::MissingScore(dimension))
    }

    pub fn contains(&self, dimension: ScoreDimension) -> bool {
        self.scores.contains_key(&dimension)
    }

    /// True once every dimension has a score
    pub fn is_complete(&self) -> bool {
        ScoreDimension::ALL.iter().all(|d| self.scores.contains_key(d))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoreDimension, f64)> + '_ {
        self.scores.iter().map(|(d, v)| (*d, *v))
    }
}

impl FromIterator<(ScoreDimension, f64)> for ScoreSet {
    fn from_iter<I: IntoIterator<Item = (ScoreDimension, f64)>>(iter: I) -> Self {
        let mut set = ScoreSet::new();
        for (dimension, value) in iter {
            set.insert(dimension, value);
        }
        set
    }
}
