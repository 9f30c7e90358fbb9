//! Configuration management for scrapewatch
//!
//! Layered configuration in the usual priority order:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Environment Variables
//!
//! Settings can be overridden with the pattern `SCRAPEWATCH__<section>__<key>`:
//! - `SCRAPEWATCH__API__BASE_URL=https://scraper.example.com`
//! - `SCRAPEWATCH__WATCH__POLL_INTERVAL_SECS=10`
//!
//! The portal API password is a secret and is never read from TOML; it
//! comes from `SCRAPEWATCH_API_PASSWORD` (or a `.env` file via dotenvy).
//!
//! # Configuration File
//!
//! By default the file is loaded from `config/scrapewatch.toml`; override
//! the path with the `SCRAPEWATCH_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{ApiSettings, Config, WatchSettings};
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
    /// Load configuration from all sources (file + environment).
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path.
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
