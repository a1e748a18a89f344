//! Configuration management for the registry session host
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with REGISTRY_ prefix

use config::{ConfigError, Environment, File};
use registry_shared::ViewConfig;
use serde::Deserialize;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "REGISTRY";

/// Main host configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Status thresholds, refresh cadence and display language
    pub view: ViewConfig,

    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directive used when RUST_LOG is unset
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("REGISTRY_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_from(&environment, ENV_PREFIX)
    }

    /// Load for a given environment name, reading overrides under `env_prefix`
    pub fn load_from(environment: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        let defaults = ViewConfig::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("view.expiring_soon_days", defaults.expiring_soon_days)?
            .set_default("view.refresh_interval_secs", defaults.refresh_interval_secs)?
            .set_default("view.language", "spanish")?
            .set_default("log.filter", "registry_host=info,registry_shared=info")?
            .set_default("log.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (REGISTRY_ prefix)
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "registry_host=info,registry_shared=info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_shared::Language;

    #[test]
    fn test_defaults_without_sources() {
        let config = Config::load_from("unit-test-missing", "REGISTRY_TEST_DEFAULTS").unwrap();

        assert_eq!(config.environment, "unit-test-missing");
        assert_eq!(config.view, ViewConfig::default());
        assert_eq!(config.log.filter, LogConfig::default().filter);
        assert!(!config.log.json);
    }

    #[test]
    fn test_environment_overrides() {
        std::env::set_var("REGISTRY_TEST_OVERRIDES_VIEW__REFRESH_INTERVAL_SECS", "5");
        std::env::set_var("REGISTRY_TEST_OVERRIDES_VIEW__LANGUAGE", "english");
        std::env::set_var("REGISTRY_TEST_OVERRIDES_LOG__JSON", "true");

        let config = Config::load_from("unit-test-missing", "REGISTRY_TEST_OVERRIDES").unwrap();

        assert_eq!(config.view.refresh_interval_secs, 5);
        assert_eq!(config.view.language, Language::English);
        assert_eq!(config.view.expiring_soon_days, 30);
        assert!(config.log.json);
    }
}
