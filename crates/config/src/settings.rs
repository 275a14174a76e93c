//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{analysis, gate, synthesis};
use crate::ConfigError;
use response_gate_core::{AudioFormat, EntityLabel, RouteCategory};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Testing mode - deterministic backends preferred
    Testing,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Production => "production",
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, testing, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Gate decision configuration
    #[serde(default)]
    pub gate: GateConfig,

    /// Analysis tuning
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Content filter configuration
    #[serde(default)]
    pub filter: FilterConfig,

    /// Speech synthesis adapter configuration
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Reroute configuration
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Gate decision configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Minimum overall score for acceptance, in (0, 1]
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Timeout for the whole scoring join; late analyzers degrade
    #[serde(default = "default_scoring_timeout_ms")]
    pub scoring_timeout_ms: u64,
}

fn default_confidence_threshold() -> f64 {
    gate::DEFAULT_CONFIDENCE_THRESHOLD
}

fn default_scoring_timeout_ms() -> u64 {
    gate::SCORING_TIMEOUT_MS
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            scoring_timeout_ms: default_scoring_timeout_ms(),
        }
    }
}

/// Analysis tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Topic count for the joint topic model
    #[serde(default = "default_topic_count")]
    pub topic_count: usize,

    /// Minimum weight for a topic to count as dominant
    #[serde(default = "default_dominant_topic_min_weight")]
    pub dominant_topic_min_weight: f64,
}

fn default_topic_count() -> usize {
    analysis::TOPIC_COUNT
}

fn default_dominant_topic_min_weight() -> f64 {
    analysis::DOMINANT_TOPIC_MIN_WEIGHT
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            topic_count: default_topic_count(),
            dominant_topic_min_weight: default_dominant_topic_min_weight(),
        }
    }
}

/// Content filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Entity labels whose presence drops the containing sentence
    #[serde(default = "default_sensitive_labels")]
    pub sensitive_labels: Vec<EntityLabel>,
}

fn default_sensitive_labels() -> Vec<EntityLabel> {
    EntityLabel::SENSITIVE.to_vec()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            sensitive_labels: default_sensitive_labels(),
        }
    }
}

/// Endpoint selection policy for multi-endpoint adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Pick a random endpoint per request
    #[default]
    Random,
    /// Rotate through endpoints in order
    RoundRobin,
}

/// Bounded retry policy for transient adapter failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first call
    #[serde(default = "default_retry_max_attempts")]
    pub max_attempts: u32,

    /// First backoff delay; doubles per failed attempt
    #[serde(default = "default_retry_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Backoff ceiling
    #[serde(default = "default_retry_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_retry_max_attempts() -> u32 {
    synthesis::RETRY_MAX_ATTEMPTS
}

fn default_retry_initial_backoff_ms() -> u64 {
    synthesis::RETRY_INITIAL_BACKOFF_MS
}

fn default_retry_max_backoff_ms() -> u64 {
    synthesis::RETRY_MAX_BACKOFF_MS
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_retry_max_attempts(),
            initial_backoff_ms: default_retry_initial_backoff_ms(),
            max_backoff_ms: default_retry_max_backoff_ms(),
        }
    }
}

/// Speech synthesis adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Disable to skip synthesis entirely
    #[serde(default = "default_synthesis_enabled")]
    pub enabled: bool,

    /// Candidate service endpoints; one is selected per request
    #[serde(default = "default_synthesis_endpoints")]
    pub endpoints: Vec<String>,

    /// Optional bearer token sent with each request
    #[serde(default)]
    pub api_key: Option<String>,

    /// How to pick among multiple endpoints
    #[serde(default)]
    pub selection: SelectionPolicy,

    /// Requested audio container format
    #[serde(default)]
    pub output_format: AudioFormat,

    /// Per-request timeout
    #[serde(default = "default_synthesis_timeout_ms")]
    pub timeout_ms: u64,

    /// Retry policy for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_synthesis_enabled() -> bool {
    true
}

fn default_synthesis_endpoints() -> Vec<String> {
    vec![synthesis::DEFAULT_ENDPOINT.to_string()]
}

fn default_synthesis_timeout_ms() -> u64 {
    synthesis::TIMEOUT_MS
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            enabled: default_synthesis_enabled(),
            endpoints: default_synthesis_endpoints(),
            api_key: None,
            selection: SelectionPolicy::default(),
            output_format: AudioFormat::default(),
            timeout_ms: default_synthesis_timeout_ms(),
            retry: RetryConfig::default(),
        }
    }
}

/// Reroute configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Disable to skip reroute classification for rejected queries
    #[serde(default = "default_routing_enabled")]
    pub enabled: bool,

    /// Category used when classification yields nothing useful
    #[serde(default = "default_fallback_category")]
    pub fallback_category: RouteCategory,
}

fn default_routing_enabled() -> bool {
    true
}

fn default_fallback_category() -> RouteCategory {
    RouteCategory::GeneralKnowledge
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            enabled: default_routing_enabled(),
            fallback_category: default_fallback_category(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub log_json: bool,

    /// Record gate counters and histograms
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_gate()?;
        self.validate_analysis()?;
        self.validate_synthesis()?;

        Ok(())
    }

    fn validate_gate(&self) -> Result<(), ConfigError> {
        let threshold = self.gate.confidence_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "gate.confidence_threshold".to_string(),
                message: format!("Must lie in (0.0, 1.0], got {}", threshold),
            });
        }

        if self.gate.scoring_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gate.scoring_timeout_ms".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    fn validate_analysis(&self) -> Result<(), ConfigError> {
        if self.analysis.topic_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.topic_count".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.analysis.dominant_topic_min_weight) {
            return Err(ConfigError::InvalidValue {
                field: "analysis.dominant_topic_min_weight".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    self.analysis.dominant_topic_min_weight
                ),
            });
        }

        Ok(())
    }

    fn validate_synthesis(&self) -> Result<(), ConfigError> {
        let synthesis = &self.synthesis;
        if !synthesis.enabled {
            return Ok(());
        }

        if synthesis.endpoints.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "synthesis.endpoints".to_string(),
                message: "At least one endpoint required when synthesis is enabled".to_string(),
            });
        }

        for endpoint in &synthesis.endpoints {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: "synthesis.endpoints".to_string(),
                    message: format!("Endpoint must be an http(s) URL, got '{}'", endpoint),
                });
            }
        }

        if synthesis.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "synthesis.timeout_ms".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if synthesis.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "synthesis.retry.max_attempts".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if synthesis.retry.initial_backoff_ms > synthesis.retry.max_backoff_ms {
            return Err(ConfigError::InvalidValue {
                field: "synthesis.retry.initial_backoff_ms".to_string(),
                message: format!(
                    "Must not exceed max_backoff_ms ({} > {})",
                    synthesis.retry.initial_backoff_ms, synthesis.retry.max_backoff_ms
                ),
            });
        }

        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (RESPONSE_GATE_ prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::with_name("config/default").required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("RESPONSE_GATE")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.gate.confidence_threshold, 0.7);
        assert_eq!(settings.analysis.topic_count, 5);
        assert!(settings.synthesis.enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_default_sensitive_labels_match_standard_set() {
        let settings = Settings::default();
        assert_eq!(settings.filter.sensitive_labels.len(), 6);
        assert!(settings
            .filter
            .sensitive_labels
            .contains(&EntityLabel::Person));
        assert!(!settings.filter.sensitive_labels.contains(&EntityLabel::Date));
    }

    #[test]
    fn test_gate_validation_threshold() {
        let mut settings = Settings::default();

        settings.gate.confidence_threshold = 0.0;
        assert!(settings.validate_gate().is_err());

        settings.gate.confidence_threshold = 1.5;
        assert!(settings.validate_gate().is_err());

        settings.gate.confidence_threshold = 1.0;
        assert!(settings.validate_gate().is_ok());
    }

    #[test]
    fn test_gate_validation_timeout() {
        let mut settings = Settings::default();
        settings.gate.scoring_timeout_ms = 0;
        assert!(settings.validate_gate().is_err());
    }

    #[test]
    fn test_analysis_validation() {
        let mut settings = Settings::default();

        settings.analysis.topic_count = 0;
        assert!(settings.validate_analysis().is_err());
        settings.analysis.topic_count = 5;

        settings.analysis.dominant_topic_min_weight = 1.2;
        assert!(settings.validate_analysis().is_err());
    }

    #[test]
    fn test_synthesis_validation() {
        let mut settings = Settings::default();

        settings.synthesis.endpoints.clear();
        assert!(settings.validate_synthesis().is_err());

        settings.synthesis.endpoints = vec!["ftp://bad".to_string()];
        assert!(settings.validate_synthesis().is_err());

        settings.synthesis.endpoints = vec!["http://127.0.0.1:8091".to_string()];
        settings.synthesis.retry.max_attempts = 0;
        assert!(settings.validate_synthesis().is_err());

        settings.synthesis.retry.max_attempts = 3;
        settings.synthesis.retry.initial_backoff_ms = 5_000;
        assert!(settings.validate_synthesis().is_err());
    }

    #[test]
    fn test_disabled_synthesis_skips_validation() {
        let mut settings = Settings::default();
        settings.synthesis.enabled = false;
        settings.synthesis.endpoints.clear();
        assert!(settings.validate_synthesis().is_ok());
    }

    #[test]
    fn test_environment_parsing() {
        let parsed: RuntimeEnvironment = serde_json::from_str("\"production\"").unwrap();
        assert!(parsed.is_production());
        assert_eq!(RuntimeEnvironment::Testing.as_str(), "testing");
    }

    #[test]
    fn test_load_settings_reads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("config");
        std::fs::create_dir(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("default.yaml"),
            "gate:\n  confidence_threshold: 0.8\nsynthesis:\n  enabled: false\n",
        )
        .unwrap();

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let settings = load_settings(None);
        std::env::set_current_dir(previous).unwrap();

        let settings = settings.unwrap();
        assert_eq!(settings.gate.confidence_threshold, 0.8);
        assert!(!settings.synthesis.enabled);
    }
}
