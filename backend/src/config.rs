//! Configuration management for the AgriFund Weather Advisory Service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGF_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Forecast provider configuration
    pub forecast: ForecastConfig,

    /// Advisory evaluation configuration
    pub advisory: AdvisoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Forecast API endpoint
    pub api_endpoint: String,

    /// How many hours of hourly forecast to fetch per task
    pub horizon_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdvisoryConfig {
    /// Run evaluation cycles automatically in the background
    pub auto_evaluate: bool,

    /// Minutes between automatic evaluation cycles
    pub interval_minutes: u64,

    /// Window within which alerts for the same task and condition
    /// are considered duplicates
    pub dedup_window_hours: i64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("AGF_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("forecast.api_endpoint", "https://api.open-meteo.com/v1/forecast")?
            .set_default("forecast.horizon_hours", 72)?
            .set_default("advisory.auto_evaluate", true)?
            .set_default("advisory.interval_minutes", 60)?
            .set_default("advisory.dedup_window_hours", 24)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGF_ prefix)
            .add_source(
                Environment::with_prefix("AGF")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
