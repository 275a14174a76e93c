//! Speech synthesis adapters
//!
//! The gate reaches text-to-speech only through the [`SpeechSynthesizer`]
//! trait. [`HttpSynthesizer`] posts to an external synthesis service and
//! maps transport failures to retryable errors; [`RetryingSynthesizer`]
//! wraps any synthesizer with bounded exponential backoff.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use response_gate_config::constants::synthesis;
use response_gate_config::{RetryConfig, SelectionPolicy, SynthesisConfig};
use response_gate_core::{AudioArtifact, AudioFormat, Error, Result, SpeechSynthesizer};

use crate::metrics::record_synthesis_latency;

/// Picks one endpoint per request from the configured candidates
#[derive(Debug)]
pub struct EndpointSelector {
    endpoints: Vec<String>,
    policy: SelectionPolicy,
    cursor: AtomicUsize,
}

impl EndpointSelector {
    pub fn new(endpoints: Vec<String>, policy: SelectionPolicy) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(Error::Config(
                "At least one synthesis endpoint required".to_string(),
            ));
        }
        Ok(Self {
            endpoints,
            policy,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Endpoint for the next request
    pub fn select(&self) -> &str {
        use rand::Rng;
        let index = match self.policy {
            SelectionPolicy::Random => rand::thread_rng().gen_range(0..self.endpoints.len()),
            SelectionPolicy::RoundRobin => {
                self.cursor.fetch_add(1, Ordering::Relaxed) % self.endpoints.len()
            }
        };
        &self.endpoints[index]
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Wire request sent to the synthesis service
#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    format: AudioFormat,
}

/// HTTP speech synthesizer
///
/// Sends accepted, filtered text to an external synthesis service and
/// returns the audio bytes it responds with. Timeouts, connection
/// failures, and 5xx responses come back as `Error::AdapterUnavailable`
/// so a retry wrapper can re-attempt them; 4xx responses are terminal.
pub struct HttpSynthesizer {
    config: SynthesisConfig,
    client: reqwest::Client,
    selector: EndpointSelector,
}

impl HttpSynthesizer {
    /// Create a new HTTP synthesizer without probing the service
    pub fn new(config: SynthesisConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::Synthesis(format!("Failed to create HTTP client: {}", e)))?;

        let selector = EndpointSelector::new(config.endpoints.clone(), config.selection)?;

        Ok(Self {
            config,
            client,
            selector,
        })
    }

    /// Create a synthesizer and probe one endpoint's health
    ///
    /// An unreachable service only logs a warning; requests made later
    /// fail individually and are absorbed by the gate.
    pub async fn connect(config: SynthesisConfig) -> Result<Self> {
        let synthesizer = Self::new(config)?;

        let endpoint = synthesizer.selector.select().to_string();
        let health_url = format!("{}{}", endpoint, synthesis::HEALTH_PATH);
        match synthesizer.client.get(&health_url).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(
                    "Speech synthesis backend connected to {} (format: {})",
                    endpoint,
                    synthesizer.config.output_format
                );
            }
            Ok(resp) => {
                tracing::warn!(
                    "Speech synthesis service returned status {} - proceeding anyway",
                    resp.status()
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Speech synthesis service not reachable: {} - will retry on first request",
                    e
                );
            }
        }

        Ok(synthesizer)
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<AudioArtifact> {
        let endpoint = self.selector.select();
        let url = format!("{}{}", endpoint, synthesis::SYNTHESIZE_PATH);
        let started = Instant::now();

        let mut request = self.client.post(&url).json(&SynthesizeRequest {
            text,
            format: self.config.output_format,
        });
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::AdapterUnavailable(format!("Synthesis request failed: {}", e)))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(Error::AdapterUnavailable(format!(
                "Synthesis service returned error: {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(Error::Synthesis(format!(
                "Synthesis service rejected the request: {}",
                status
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            Error::AdapterUnavailable(format!("Failed to read synthesis response: {}", e))
        })?;

        record_synthesis_latency(started.elapsed().as_secs_f64());
        tracing::debug!(
            "Synthesized {} bytes of {} audio in {:?}",
            bytes.len(),
            self.config.output_format,
            started.elapsed()
        );

        Ok(AudioArtifact::new(bytes.to_vec(), self.config.output_format))
    }

    fn backend_name(&self) -> &str {
        "http-synthesizer"
    }
}

/// Bounded-retry wrapper over any synthesizer
///
/// Re-attempts only errors marked retryable, doubling the backoff per
/// failure up to the configured ceiling. Terminal errors pass through
/// on the first attempt.
pub struct RetryingSynthesizer {
    inner: Arc<dyn SpeechSynthesizer>,
    retry: RetryConfig,
}

impl RetryingSynthesizer {
    pub fn new(inner: Arc<dyn SpeechSynthesizer>, retry: RetryConfig) -> Self {
        Self { inner, retry }
    }
}

#[async_trait]
impl SpeechSynthesizer for RetryingSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<AudioArtifact> {
        let mut backoff_ms = self.retry.initial_backoff_ms;
        let mut attempt = 1u32;

        loop {
            match self.inner.synthesize(text).await {
                Ok(artifact) => return Ok(artifact),
                Err(err) if err.is_retryable() && attempt < self.retry.max_attempts => {
                    tracing::warn!(
                        "Synthesis attempt {}/{} failed: {} - retrying in {}ms",
                        attempt,
                        self.retry.max_attempts,
                        err,
                        backoff_ms
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms = (backoff_ms * 2).min(self.retry.max_backoff_ms);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn backend_name(&self) -> &str {
        self.inner.backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlakySynthesizer {
        calls: AtomicUsize,
        failures: usize,
    }

    impl FlakySynthesizer {
        fn new(failures: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures,
            }
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for FlakySynthesizer {
        async fn synthesize(&self, text: &str) -> Result<AudioArtifact> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(Error::AdapterUnavailable("connection refused".to_string()))
            } else {
                Ok(AudioArtifact::new(text.as_bytes().to_vec(), AudioFormat::Wav))
            }
        }

        fn backend_name(&self) -> &str {
            "flaky"
        }
    }

    struct BrokenSynthesizer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SpeechSynthesizer for BrokenSynthesizer {
        async fn synthesize(&self, _text: &str) -> Result<AudioArtifact> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Synthesis("unsupported voice".to_string()))
        }

        fn backend_name(&self) -> &str {
            "broken"
        }
    }

    fn fast_retry(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_backoff_ms: 1,
            max_backoff_ms: 4,
        }
    }

    #[test]
    fn test_round_robin_cycles_endpoints() {
        let selector = EndpointSelector::new(
            vec!["http://a".to_string(), "http://b".to_string()],
            SelectionPolicy::RoundRobin,
        )
        .unwrap();

        assert_eq!(selector.select(), "http://a");
        assert_eq!(selector.select(), "http://b");
        assert_eq!(selector.select(), "http://a");
        assert_eq!(selector.len(), 2);
    }

    #[test]
    fn test_random_selection_stays_in_set() {
        let endpoints = vec!["http://a".to_string(), "http://b".to_string()];
        let selector = EndpointSelector::new(endpoints.clone(), SelectionPolicy::Random).unwrap();

        for _ in 0..20 {
            assert!(endpoints.iter().any(|e| e == selector.select()));
        }
    }

    #[test]
    fn test_empty_endpoint_list_rejected() {
        assert!(EndpointSelector::new(vec![], SelectionPolicy::Random).is_err());

        let config = SynthesisConfig {
            endpoints: vec![],
            ..Default::default()
        };
        assert!(HttpSynthesizer::new(config).is_err());
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failures() {
        let inner = Arc::new(FlakySynthesizer::new(2));
        let synthesizer = RetryingSynthesizer::new(inner.clone(), fast_retry(3));

        let artifact = synthesizer.synthesize("All clear.").await.unwrap();
        assert_eq!(artifact.format, AudioFormat::Wav);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_attempts() {
        let inner = Arc::new(FlakySynthesizer::new(10));
        let synthesizer = RetryingSynthesizer::new(inner.clone(), fast_retry(3));

        let err = synthesizer.synthesize("All clear.").await;
        assert!(matches!(err, Err(Error::AdapterUnavailable(_))));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_terminal_errors_are_not_retried() {
        let inner = Arc::new(BrokenSynthesizer {
            calls: AtomicUsize::new(0),
        });
        let synthesizer = RetryingSynthesizer::new(inner.clone(), fast_retry(5));

        let err = synthesizer.synthesize("All clear.").await;
        assert!(matches!(err, Err(Error::Synthesis(_))));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backend_name_delegates_to_inner() {
        let inner = Arc::new(FlakySynthesizer::new(0));
        let synthesizer = RetryingSynthesizer::new(inner, fast_retry(3));
        assert_eq!(synthesizer.backend_name(), "flaky");
    }
}
