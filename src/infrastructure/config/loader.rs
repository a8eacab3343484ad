use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::{CacheBackend, Config};

/// Project config file, read from the working directory.
pub const CONFIG_FILE: &str = "coursehub.yaml";

/// Optional local overrides, read from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "coursehub.local.yaml";

/// Prefix for environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "COURSEHUB_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid cache ttl_secs: {0}. Must be at least 1")]
    InvalidCacheTtl(u64),

    #[error("cache.url is required when cache.backend is redis")]
    MissingCacheUrl,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error(
        "Invalid page sizes: default_per_page ({0}) must be between 1 and max_per_page ({1})"
    )]
    InvalidPageSize(u32, u32),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. coursehub.yaml
    /// 3. coursehub.local.yaml (optional overrides)
    /// 4. Environment variables (COURSEHUB_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        Self::load_layers(&[Path::new(CONFIG_FILE), Path::new(LOCAL_CONFIG_FILE)])
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        Self::load_layers(&[path])
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn load_layers(files: &[&Path]) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        for file in files {
            figment = figment.merge(Yaml::file(file));
        }

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        if config.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidCacheTtl(config.cache.ttl_secs));
        }

        if config.cache.backend == CacheBackend::Redis
            && config.cache.url.as_deref().is_none_or(str::is_empty)
        {
            return Err(ConfigError::MissingCacheUrl);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        let server = &config.server;
        if server.default_per_page == 0 || server.default_per_page > server.max_per_page {
            return Err(ConfigError::InvalidPageSize(
                server.default_per_page,
                server.max_per_page,
            ));
        }

        Ok(())
    }
}
