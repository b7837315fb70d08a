//! Configuration management for the plan assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML files under `config/` (`default`, then `{env}`)
//! - Environment variables (`PLAN_ASSISTANT__` prefix, `__` separator)
//! - Built-in defaults from [`constants`]

pub mod constants;
pub mod dialogue;
pub mod settings;

pub use dialogue::{AccountConfig, DialogueConfig, EnrollmentPolicyConfig, LoanPolicyConfig};
pub use settings::{
    load_settings, load_settings_from, ObservabilityConfig, RuntimeEnvironment, ServerConfig,
    Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => ConfigError::FileNotFound(key),
            other => ConfigError::ParseError(other.to_string()),
        }
    }
}
