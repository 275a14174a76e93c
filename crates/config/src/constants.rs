//! Centralized constants for the response gate
//!
//! Single source of truth for default thresholds, timeouts, and endpoints.
//! Settings defaults reference these so file overrides and code defaults
//! cannot drift apart.

/// Gate decision defaults
pub mod gate {
    /// Minimum overall score an accepted candidate must reach
    pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

    /// Upper bound on the whole scoring join; late analyzers degrade
    pub const SCORING_TIMEOUT_MS: u64 = 5_000;

    /// Score substituted when an analyzer fails or times out
    pub const NEUTRAL_SCORE: f64 = 0.5;
}

/// Analysis tuning
pub mod analysis {
    /// Topic count for the joint topic model
    pub const TOPIC_COUNT: usize = 5;

    /// Minimum weight for a topic to count as dominant for a document.
    /// Slightly above uniform weight for the default topic count.
    pub const DOMINANT_TOPIC_MIN_WEIGHT: f64 = 0.25;
}

/// Speech synthesis adapter defaults
pub mod synthesis {
    /// Default synthesis service endpoint
    pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8091";

    /// Health check path appended to each endpoint
    pub const HEALTH_PATH: &str = "/health";

    /// Synthesis request path
    pub const SYNTHESIZE_PATH: &str = "/synthesize";

    /// Per-request timeout
    pub const TIMEOUT_MS: u64 = 15_000;

    /// Bounded retry attempts for transient failures
    pub const RETRY_MAX_ATTEMPTS: u32 = 3;

    /// First backoff delay; doubles per attempt
    pub const RETRY_INITIAL_BACKOFF_MS: u64 = 200;

    /// Backoff ceiling
    pub const RETRY_MAX_BACKOFF_MS: u64 = 2_000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_constants_in_range() {
        assert!(gate::DEFAULT_CONFIDENCE_THRESHOLD > 0.0);
        assert!(gate::DEFAULT_CONFIDENCE_THRESHOLD <= 1.0);
        assert!(gate::NEUTRAL_SCORE >= 0.0 && gate::NEUTRAL_SCORE <= 1.0);
    }

    #[test]
    fn test_dominant_weight_above_uniform() {
        let uniform = 1.0 / analysis::TOPIC_COUNT as f64;
        assert!(analysis::DOMINANT_TOPIC_MIN_WEIGHT > uniform);
        assert!(analysis::DOMINANT_TOPIC_MIN_WEIGHT < 1.0);
    }

    #[test]
    fn test_backoff_relationship() {
        assert!(synthesis::RETRY_INITIAL_BACKOFF_MS < synthesis::RETRY_MAX_BACKOFF_MS);
        assert!(synthesis::RETRY_MAX_ATTEMPTS >= 1);
        assert!(synthesis::TIMEOUT_MS > synthesis::RETRY_MAX_BACKOFF_MS);
    }
}
