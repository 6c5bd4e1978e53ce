//! Configuration management for the health calculator CLI
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. A TOML config file (`--config FILE`, else config/{RUST_ENV}.toml)
//! 3. Environment variables (prefix: HC__)

use anyhow::Result;
use health_calculator_shared::{ActivityLevel, BiologicalSex, Locale};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub locale: Locale,
    /// Width of the text gauge bar in characters
    pub gauge_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Zh,
            gauge_width: 20,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Initial form values
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    pub sex: BiologicalSex,
    pub activity_level: ActivityLevel,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. `path` if given (must exist), else config/{RUST_ENV}.toml if present
    /// 3. Environment variables with HC__ prefix
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => {
                let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
                config::File::with_name(&format!("config/{}", env)).required(false)
            }
        };

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(file)
            // e.g., HC__DISPLAY__LOCALE=en sets display.locale
            .add_source(config::Environment::with_prefix("HC").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
