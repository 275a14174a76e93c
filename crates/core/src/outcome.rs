//! Terminal gate results returned to the caller

use serde::{Deserialize, Serialize};

/// Audio container formats a synthesis backend can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
    OggOpus,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::OggOpus => "ogg_opus",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::OggOpus => "audio/ogg",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synthesized speech bytes with their container format
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioArtifact {
    pub bytes: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioArtifact {
    pub fn new(bytes: Vec<u8>, format: AudioFormat) -> Self {
        Self { bytes, format }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Keep Debug output readable; artifacts can carry hundreds of KB
impl std::fmt::Debug for AudioArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioArtifact")
            .field("format", &self.format)
            .field("bytes", &format!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// Fixed category set for rerouting rejected queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteCategory {
    GeneralKnowledge,
    TechnicalSupport,
    CustomerService,
    ProductInquiry,
}

impl RouteCategory {
    /// All categories in canonical order
    pub const ALL: [RouteCategory; 4] = [
        RouteCategory::GeneralKnowledge,
        RouteCategory::TechnicalSupport,
        RouteCategory::CustomerService,
        RouteCategory::ProductInquiry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteCategory::GeneralKnowledge => "general_knowledge",
            RouteCategory::TechnicalSupport => "technical_support",
            RouteCategory::CustomerService => "customer_service",
            RouteCategory::ProductInquiry => "product_inquiry",
        }
    }
}

impl std::fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dispatch decision for a rejected query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerouteDecision {
    /// Top-ranked category from the router
    pub category: RouteCategory,
    /// The original query, handed unchanged to the alternate handler
    pub query: String,
}

impl RerouteDecision {
    pub fn new(category: RouteCategory, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }
}

/// Terminal gate result consumed by the caller
///
/// Exactly these four fields, in every case:
/// - rejected: `(false, score, None, None)`
/// - accepted, fully filtered: `(true, score, Some(""), None)`
/// - accepted with audio: `(true, score, Some(text), Some(artifact))`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateOutcome {
    pub accepted: bool,
    pub overall_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioArtifact>,
}

impl GateOutcome {
    /// Outcome for a rejected candidate
    pub fn rejected(overall_score: f64) -> Self {
        Self {
            accepted: false,
            overall_score,
            filtered_text: None,
            audio: None,
        }
    }

    /// Outcome for an accepted candidate, before any synthesis
    pub fn accepted(overall_score: f64, filtered_text: impl Into<String>) -> Self {
        Self {
            accepted: true,
            overall_score,
            filtered_text: Some(filtered_text.into()),
            audio: None,
        }
    }

    /// Attach a synthesized artifact
    pub fn with_audio(mut self, audio: AudioArtifact) -> Self {
        self.audio = Some(audio);
        self
    }
}
