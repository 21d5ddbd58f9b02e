//! Configuration management for the WAF decision engine.
//!
//! This module handles loading and managing application configuration
//! from environment variables and configuration files.

use crate::models::Config;
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use std::env;

/// Load configuration from the config file and environment variables
pub fn load_config() -> Result<Config, ConfigError> {
    let config_file = env::var("CONFIG_FILE").unwrap_or_else(|_| "config/default.toml".to_string());

    let config = ConfigBuilder::builder()
        .add_source(File::with_name(&config_file).required(false))
        .add_source(Environment::default())
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("waf.max_requests", 5)?
        .set_default("waf.time_window_seconds", 10)?
        .set_default("waf.max_payload_size", 500)?
        .set_default("waf.sensitive_endpoints", vec!["/admin".to_string()])?
        .set_default("eviction.enabled", true)?
        .set_default("eviction.interval_seconds", 60)?
        .build()?;

    config.try_deserialize()
}
