//! Configuration module for the order engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the order lifecycle core and its adapters.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("page size: {}", config.orders.default_page_size);
//! ```

mod catalog;
mod custody;
mod logging;
mod orders;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{CatalogConfig, ProductEntry};
pub use custody::{CustodyConfig, CustodyServiceEntry};
pub use logging::{LogFormat, LoggingConfig};
pub use orders::OrdersConfig;

use crate::domain::order_lifecycle::value_objects::MAX_PAGE_SIZE;
use crate::domain::shared::Currency;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
///
/// Every section is optional; an empty document yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Order lifecycle settings.
    #[serde(default)]
    pub orders: OrdersConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Static product catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Custody services.
    #[serde(default)]
    pub custody: CustodyConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let orders = &config.orders;

    if Currency::parse(&orders.default_currency).is_err() {
        return Err(ConfigError::ValidationError(format!(
            "orders.default_currency must be a three-letter code, got '{}'",
            orders.default_currency
        )));
    }

    if orders.max_page_size == 0 || orders.max_page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::ValidationError(format!(
            "orders.max_page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }

    if orders.default_page_size == 0 || orders.default_page_size > orders.max_page_size {
        return Err(ConfigError::ValidationError(
            "orders.default_page_size must be between 1 and orders.max_page_size".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for product in &config.catalog.products {
        if product.id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "catalog.products[].id must not be empty".to_string(),
            ));
        }
        if !seen.insert(product.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "catalog product '{}' is listed more than once",
                product.id
            )));
        }
        if product.unit_price.is_negative() {
            return Err(ConfigError::ValidationError(format!(
                "catalog product '{}' has a negative unit_price",
                product.id
            )));
        }
    }

    let mut seen = HashSet::new();
    for service in &config.custody.services {
        if !seen.insert(service.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "custody service '{}' is listed more than once",
                service.id
            )));
        }
        if service.fee.is_negative() {
            return Err(ConfigError::ValidationError(format!(
                "custody service '{}' has a negative fee",
                service.id
            )));
        }
        if let Some(currency) = &service.currency
            && Currency::parse(currency).is_err()
        {
            return Err(ConfigError::ValidationError(format!(
                "custody service '{}' has an invalid currency '{currency}'",
                service.id
            )));
        }
    }

    Ok(())
}
