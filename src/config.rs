//! Configuration module for the portfolio persistence layer.
//!
//! Loads configuration from YAML files and environment variables.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLx connection URL, e.g. `sqlite://portfolio.db?mode=rwc`.
    pub url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PORTFOLIO_*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables with PORTFOLIO_ prefix
            .add_source(
                Environment::with_prefix("PORTFOLIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        5
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://portfolio.db?mode=rwc".to_string(),
            max_connections: Self::default_max_connections(),
        }
    }
}
