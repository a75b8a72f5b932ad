//! Core runtime configuration.
//!
//! Resolved once at process startup and passed into the store, so request handling never
//! reads environment variables.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable naming the data file.
pub const DATA_FILE_ENV: &str = "SAFETYNET_DATA_FILE";

/// Data file used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
}

impl CoreConfig {
    pub fn new(data_file: PathBuf) -> Result<Self, ConfigError> {
        if data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data file path cannot be empty".into()));
        }
        Ok(Self { data_file })
    }

    /// Resolve the data file: explicit override, then `SAFETYNET_DATA_FILE`, then `data.json`.
    pub fn resolve(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(DATA_FILE_ENV).map(PathBuf::from);
        Self::resolve_from(override_path, env_path)
    }

    fn resolve_from(
        override_path: Option<PathBuf>,
        env_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let data_file = override_path
            .or(env_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        Self::new(data_file)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order() {
        let config = CoreConfig::resolve_from(
            Some(PathBuf::from("override.json")),
            Some(PathBuf::from("env.json")),
        )
        .unwrap();
        assert_eq!(config.data_file(), Path::new("override.json"));

        let config = CoreConfig::resolve_from(None, Some(PathBuf::from("env.json"))).unwrap();
        assert_eq!(config.data_file(), Path::new("env.json"));

        let config = CoreConfig::resolve_from(None, None).unwrap();
        assert_eq!(config.data_file(), Path::new(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(CoreConfig::new(PathBuf::new()).is_err());
        assert!(CoreConfig::resolve_from(Some(PathBuf::new()), None).is_err());
    }
}
