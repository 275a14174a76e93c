//! Response scoring trait

use crate::error::Result;
use crate::score::ScoreDimension;
use async_trait::async_trait;

/// One scoring capability of the gate
///
/// An analyzer measures a single quality dimension of a candidate response
/// against the query that produced it and returns a score in [0, 1].
/// Scoring calls are stateless: instances are shared process-wide across
/// concurrent requests and must not mutate internal state per call.
///
/// Implementations return `Err` on internal failure; the gate absorbs the
/// error and substitutes a neutral score rather than aborting the request.
///
/// # Example
///
/// ```ignore
/// let analyzer: Arc<dyn ResponseAnalyzer> = registry.get(ScoreDimension::Relevance);
/// let score = analyzer.score(query, candidate).await?;
/// ```
#[async_trait]
pub trait ResponseAnalyzer: Send + Sync + 'static {
    /// Dimension this analyzer measures
    fn dimension(&self) -> ScoreDimension;

    /// Score the candidate response in [0, 1]
    async fn score(&self, query: &str, response: &str) -> Result<f64>;

    /// Implementation name for logging
    fn name(&self) -> &str;
}
