//! Error types shared across the gate crates

use thiserror::Error;

use crate::score::ScoreDimension;

/// Result alias used throughout the workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
///
/// Only two classes of error ever reach a caller: construction-time
/// configuration defects and a score set missing a dimension. Everything
/// else is absorbed at the boundary where it occurs and degrades to a
/// neutral score or a missing optional output.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected at construction time, never at request time
    #[error("Confidence threshold must lie in (0, 1], got {0}")]
    InvalidThreshold(f64),

    /// Score set handed to the aggregator lacked a required dimension
    #[error("Score set is missing the {0} dimension")]
    MissingScore(ScoreDimension),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    /// Terminal synthesis failure (malformed request, unsupported input)
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Transient collaborator failure (timeout, connect, 5xx)
    #[error("Adapter unavailable: {0}")]
    AdapterUnavailable(String),

    #[error("Routing error: {0}")]
    Routing(String),
}

impl Error {
    /// Whether a retry wrapper may re-attempt the failed call
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::AdapterUnavailable(_))
    }

    /// Whether the error must surface to the caller instead of degrading
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InvalidThreshold(_) | Error::MissingScore(_))
    }
}
