//! Speech synthesis trait

use crate::error::Result;
use crate::outcome::AudioArtifact;
use async_trait::async_trait;

/// Text-to-speech boundary
///
/// Implementations:
/// - `HttpSynthesizer` - JSON POST to an external synthesis service
/// - `RetryingSynthesizer` - bounded-retry wrapper over any synthesizer
///
/// # Example
///
/// ```ignore
/// let tts: Arc<dyn SpeechSynthesizer> = create_synthesizer(&config)?;
/// let artifact = tts.synthesize("All clear.").await?;
/// ```
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Synthesize text into an audio artifact
    ///
    /// Transient failures (timeout, connect, 5xx) surface as
    /// `Error::AdapterUnavailable`; the gate treats those as a missing
    /// artifact, never as a request failure.
    async fn synthesize(&self, text: &str) -> Result<AudioArtifact>;

    /// Backend name for logging
    fn backend_name(&self) -> &str;
}
