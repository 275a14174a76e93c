//! Request types entering the gate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One gating request: the user query and the candidate model response
///
/// Both texts are immutable once submitted and live only as long as the
/// request that carries them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateRequest {
    /// Unique request id, carried through logs and events
    pub id: Uuid,
    /// User input the candidate was generated for
    pub query: String,
    /// Raw model output under evaluation
    pub candidate: String,
    /// Whether to synthesize audio for an accepted, non-empty response
    pub synthesize: bool,
    /// Submission time
    pub submitted_at: DateTime<Utc>,
}

impl GateRequest {
    pub fn new(query: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            candidate: candidate.into(),
            synthesize: true,
            submitted_at: Utc::now(),
        }
    }

    /// Opt in or out of audio synthesis for this request
    pub fn with_synthesis(mut self, synthesize: bool) -> Self {
        self.synthesize = synthesize;
        self
    }
}
