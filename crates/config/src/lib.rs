//! Configuration management for the response gate
//!
//! Loads layered configuration (file, then environment variables) and
//! validates every section before the gate is constructed. Defaults live
//! in [`constants`] so code and config files stay in agreement.

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, AnalysisConfig, FilterConfig, GateConfig, ObservabilityConfig, RetryConfig,
    RoutingConfig, RuntimeEnvironment, SelectionPolicy, Settings, SynthesisConfig,
};

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for response_gate_core::Error {
    fn from(err: ConfigError) -> Self {
        response_gate_core::Error::Config(err.to_string())
    }
}
