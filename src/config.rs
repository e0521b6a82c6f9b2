//! Application configuration
//!
//! Loaded from a YAML file; every field has a default so a partial (or
//! missing) file is fine. `TRUSTMAP_PORT` and `TRUSTMAP_DATASET` override the
//! file after loading.

use crate::algo::DEFAULT_MAX_PATH_LENGTH;
use crate::metrics::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub analysis: AnalysisConfig,
    pub log: LogConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// JSON array of entities
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/entities.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Reference entity for path-to-center queries when none is given
    pub center_id: Option<String>,
    /// Bound for all-paths enumeration
    pub max_path_length: usize,
    /// Default neighbourhood radius
    pub max_degrees: usize,
    pub metrics_cache_capacity: usize,
    /// Default length of ranked lists
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            center_id: None,
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            max_degrees: 2,
            metrics_cache_capacity: 4,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// tracing level: error, warn, info, debug or trace
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse YAML and validate
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        info!("Loading config from {:?}", path);
        let yaml = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `TRUSTMAP_PORT` / `TRUSTMAP_DATASET` if set
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(port) = std::env::var("TRUSTMAP_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::Invalid {
                field: "TRUSTMAP_PORT",
                reason: format!("{:?} is not a port number", port),
            })?;
        }
        if let Ok(path) = std::env::var("TRUSTMAP_DATASET") {
            self.dataset.path = PathBuf::from(path);
        }
        self.validate()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                field: "server.port",
                reason: "must be non-zero".to_string(),
            });
        }
        if self.analysis.max_path_length == 0 {
            return Err(ConfigError::Invalid {
                field: "analysis.max_path_length",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// `address:port` for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.address, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.analysis.max_path_length, 5);
        assert_eq!(config.analysis.top_n, 10);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "server:\n  port: 9000\nanalysis:\n  center_id: bitcoin\n";
        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.address, "127.0.0.1");
        assert_eq!(config.analysis.center_id.as_deref(), Some("bitcoin"));
        assert_eq!(config.analysis.max_path_length, 5);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            AppConfig::from_yaml_str("server:\n  port: 0\n"),
            Err(ConfigError::Invalid { field: "server.port", .. })
        ));
        assert!(matches!(
            AppConfig::from_yaml_str("analysis:\n  max_path_length: 0\n"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            AppConfig::from_yaml_str("server: [1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dataset:\n  path: /tmp/entities.json\nlog:\n  level: debug").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("/tmp/entities.json"));
        assert_eq!(config.log.level, "debug");

        assert!(matches!(
            AppConfig::load("/nonexistent/trustmap.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
