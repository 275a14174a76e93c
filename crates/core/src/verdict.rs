//! Verdict aggregation over a completed score set

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::score::{ScoreDimension, ScoreSet};

/// Admit/reject decision with its scalar confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Unweighted mean of the dimension scores, in [0, 1]
    pub overall_score: f64,
    /// Whether the candidate clears the confidence threshold
    pub accepted: bool,
}

/// Combines the four dimension scores into a single [`Verdict`]
///
/// The overall score is the unweighted arithmetic mean; no dimension
/// dominates. The threshold comparison is inclusive, so a mean exactly at
/// the threshold admits the candidate.
#[derive(Debug, Clone)]
pub struct VerdictAggregator {
    confidence_threshold: f64,
}

impl VerdictAggregator {
    /// Create an aggregator with the given threshold
    ///
    /// The threshold must lie in (0, 1]; anything else (including NaN) is
    /// rejected here so request-time aggregation never revalidates it.
    pub fn new(confidence_threshold: f64) -> Result<Self> {
        if !(confidence_threshold > 0.0 && confidence_threshold <= 1.0) {
            return Err(Error::InvalidThreshold(confidence_threshold));
        }
        Ok(Self {
            confidence_threshold,
        })
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Aggregate a completed score set into a verdict
    ///
    /// A missing dimension is a request-fatal defect, not a zero.
    pub fn aggregate(&self, scores: &ScoreSet) -> Result<Verdict> {
        let mut sum = 0.0;
        for dimension in ScoreDimension::ALL {
            sum += scores.require(dimension)?;
        }
        let overall_score = sum / ScoreDimension::ALL.len() as f64;

        Ok(Verdict {
            overall_score,
            accepted: overall_score >= self.confidence_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_set(relevance: f64, sentiment: f64, coherence: f64, accuracy: f64) -> ScoreSet {
        [
            (ScoreDimension::Relevance, relevance),
            (ScoreDimension::Sentiment, sentiment),
            (ScoreDimension::TopicCoherence, coherence),
            (ScoreDimension::FactualAccuracy, accuracy),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_threshold_range_enforced_at_construction() {
        assert!(VerdictAggregator::new(0.7).is_ok());
        assert!(VerdictAggregator::new(1.0).is_ok());
        assert!(VerdictAggregator::new(0.0).is_err());
        assert!(VerdictAggregator::new(-0.1).is_err());
        assert!(VerdictAggregator::new(1.01).is_err());
        assert!(VerdictAggregator::new(f64::NAN).is_err());
    }

    #[test]
    fn test_overall_score_is_arithmetic_mean() {
        let aggregator = VerdictAggregator::new(0.7).unwrap();
        let verdict = aggregator
            .aggregate(&score_set(0.9, 0.8, 0.6, 0.7))
            .unwrap();
        assert!((verdict.overall_score - 0.75).abs() < 1e-9);
        assert!(verdict.accepted);
    }

    #[test]
    fn test_threshold_comparison_is_inclusive() {
        let aggregator = VerdictAggregator::new(0.75).unwrap();
        let verdict = aggregator
            .aggregate(&score_set(0.75, 0.75, 0.75, 0.75))
            .unwrap();
        assert!((verdict.overall_score - 0.75).abs() < 1e-9);
        assert!(verdict.accepted);
    }

    #[test]
    fn test_rejection_just_below_threshold() {
        let aggregator = VerdictAggregator::new(0.76).unwrap();
        let verdict = aggregator
            .aggregate(&score_set(0.9, 0.8, 0.6, 0.7))
            .unwrap();
        assert!((verdict.overall_score - 0.75).abs() < 1e-9);
        assert!(!verdict.accepted);
    }

    #[test]
    fn test_missing_dimension_is_fatal() {
        let aggregator = VerdictAggregator::new(0.7).unwrap();
        let mut scores = ScoreSet::new();
        scores.insert(ScoreDimension::Relevance, 0.9);
        scores.insert(ScoreDimension::Sentiment, 0.8);
        scores.insert(ScoreDimension::TopicCoherence, 0.6);

        let err = aggregator.aggregate(&scores);
        assert!(matches!(
            err,
            Err(Error::MissingScore(ScoreDimension::FactualAccuracy))
        ));
    }

    #[test]
    fn test_extreme_score_sets() {
        let aggregator = VerdictAggregator::new(1.0).unwrap();

        let all_ones = aggregator
            .aggregate(&score_set(1.0, 1.0, 1.0, 1.0))
            .unwrap();
        assert!(all_ones.accepted);

        let all_zeros = aggregator
            .aggregate(&score_set(0.0, 0.0, 0.0, 0.0))
            .unwrap();
        assert!(!all_zeros.accepted);
        assert_eq!(all_zeros.overall_score, 0.0);
    }
}
