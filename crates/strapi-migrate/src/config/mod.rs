//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::{MigrateError, Result};
use std::path::Path;
use tracing::{info, warn};

impl Config {
    /// Load a dotenv file into the process environment.
    ///
    /// Variables already present in the environment win. Returns `false`
    /// when the file does not exist.
    pub fn load_env_file<P: AsRef<Path>>(path: P) -> Result<bool> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Env file {} not found, using process environment", path.display());
            return Ok(false);
        }

        dotenvy::from_path(path).map_err(|e| {
            MigrateError::Config(format!("failed to load {}: {}", path.display(), e))
        })?;
        info!("Loaded environment variables from {}", path.display());
        Ok(true)
    }

    /// Build configuration from the process environment.
    pub fn from_env(migration: MigrationConfig) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), migration)
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F, migration: MigrationConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    MigrateError::Config(format!(
                        "missing required environment variable {}",
                        key
                    ))
                })
        };

        let config = Config {
            source: EndpointConfig::new(required(SOURCE_API_VAR)?, required(SOURCE_TOKEN_VAR)?),
            destination: EndpointConfig::new(required(DEST_API_VAR)?, required(DEST_TOKEN_VAR)?),
            migration,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}
