//! Query routing trait for rejected requests

use crate::error::Result;
use crate::outcome::RouteCategory;
use async_trait::async_trait;

/// Classifies a query into the fixed reroute categories
///
/// Categories come back ranked most-likely first; the gate dispatches on
/// the top label only. The routing result is informational and never
/// changes an already-computed verdict.
#[async_trait]
pub trait QueryRouter: Send + Sync + 'static {
    async fn classify(&self, query: &str) -> Result<Vec<RouteCategory>>;

    /// Router name for logging
    fn name(&self) -> &str;
}
