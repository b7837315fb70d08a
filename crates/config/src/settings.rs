//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{server, ENV_PREFIX};
use crate::dialogue::{AccountConfig, DialogueConfig};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Relaxed validation, warnings only
    #[default]
    Development,
    /// Stricter validation
    Staging,
    /// All validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP host configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging and metrics
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Dialogue policy limits
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Participant account snapshot
    #[serde(default)]
    pub account: AccountConfig,
}

impl Settings {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dialogue.validate()?;
        self.account.validate()?;
        self.validate_server()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port must be non-zero".to_string(),
            });
        }

        if self.server.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_sessions".to_string(),
                message: "At least one session must be allowed".to_string(),
            });
        }

        if self.server.cleanup_interval_secs > self.server.session_timeout_secs {
            let message = format!(
                "Cleanup interval ({}s) exceeds session timeout ({}s)",
                self.server.cleanup_interval_secs, self.server.session_timeout_secs
            );
            if self.environment.is_strict() {
                return Err(ConfigError::InvalidValue {
                    field: "server.cleanup_interval_secs".to_string(),
                    message,
                });
            }
            tracing::warn!("{}", message);
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        let level = self.observability.log_level.to_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("Unknown level '{}'", self.observability.log_level),
            });
        }
        Ok(())
    }
}

/// HTTP host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum concurrent conversations
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Idle time after which a conversation is dropped
    #[serde(default = "default_session_timeout")]
    pub session_timeout_secs: u64,

    /// How often expired conversations are swept
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,

    /// CORS allowed origins (empty allows any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    server::DEFAULT_PORT
}
fn default_max_sessions() -> usize {
    server::MAX_SESSIONS
}
fn default_session_timeout() -> u64 {
    server::SESSION_TIMEOUT_SECS
}
fn default_cleanup_interval() -> u64 {
    server::CLEANUP_INTERVAL_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_sessions: default_max_sessions(),
            session_timeout_secs: default_session_timeout(),
            cleanup_interval_secs: default_cleanup_interval(),
            cors_origins: Vec::new(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` relative to the working directory
///
/// Priority: env vars > config/{env} > config/default > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit config directory
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_path = dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let env_path = dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.dialogue.loan.absolute_max, 50_000.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.account.vested_balance, 125_000.0);
        assert_eq!(settings.environment, RuntimeEnvironment::Development);
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 9000\ndialogue:\n  loan:\n    absolute_max: 40000\n",
        )
        .unwrap();
        fs::write(dir.path().join("staging.yaml"), "server:\n  port: 9100\n").unwrap();

        let settings = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.dialogue.loan.absolute_max, 40_000.0);
        // Untouched fields keep their defaults
        assert_eq!(settings.dialogue.loan.max_term_years, 5);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "dialogue:\n  loan:\n    balance_fraction: 2.0\n",
        )
        .unwrap();

        let err = load_settings_from(dir.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_strict_environment_rejects_soft_issues() {
        let mut settings = Settings::default();
        settings.server.cleanup_interval_secs = settings.server.session_timeout_secs + 1;
        assert!(settings.validate().is_ok());

        settings.environment = RuntimeEnvironment::Production;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let mut settings = Settings::default();
        settings.observability.log_level = "chatty".to_string();
        assert!(settings.validate().is_err());
    }
}
