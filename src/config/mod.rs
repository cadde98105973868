//! Configuration management for presently
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use presently::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Server listening on: {}", config.server.bind_addr);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `PRESENTLY__<section>__<key>`
//!
//! Examples:
//! - `PRESENTLY__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `PRESENTLY__VIEWS__PATH=/srv/views`
//! - `PRESENTLY__DISPATCH__CONTROLLER_PREFIX=demo::`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/presently.toml`.
//! This can be overridden using the `PRESENTLY_CONFIG` environment variable.
//! Without `[presenters.*]` sections an `html` and a `json` presenter are
//! registered.

mod models;
mod sources;
mod validation;

pub use models::{
    Config, DispatchConfig, PresenterConfig, PresenterKind, ServerConfig, ViewsConfig,
};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - Validation fails (bad mimes, conflicting bindings, etc.)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
