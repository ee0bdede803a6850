//! Configuration management infrastructure.
//!
//! This module provides configuration file support, allowing users to save
//! the endpoint and transport settings. Credentials are never written to disk.

use crate::adapters::task_http_client::{BodyEncoding, TaskHttpConfig};
use crate::domain::constants::{DEFAULT_TASK_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::domain::query::ValueSplit;
use crate::domain::types::EndpointUrl;
use crate::infra::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfiguration {
    /// Task endpoint
    pub base_url: String,

    /// Request timeout
    pub timeout_seconds: u64,

    /// Encoding of the task-creation body
    pub body_encoding: BodyEncoding,

    /// Handling of `=` inside query values when signing
    pub value_split: ValueSplit,
}

impl Default for ClientConfiguration {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TASK_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            body_encoding: BodyEncoding::default(),
            value_split: ValueSplit::default(),
        }
    }
}

impl ClientConfiguration {
    pub fn endpoint(&self) -> ClientResult<EndpointUrl> {
        EndpointUrl::new(&self.base_url)
    }

    #[must_use]
    pub fn http_config(&self) -> TaskHttpConfig {
        TaskHttpConfig {
            timeout: Duration::from_secs(self.timeout_seconds),
            body_encoding: self.body_encoding,
        }
    }
}

/// Configuration manager for handling config files
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new configuration manager with default path
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        match dirs::config_dir() {
            Some(config_dir) => config_dir.join("xinde-client").join("config.toml"),
            None => PathBuf::from("xinde-client-config.toml"),
        }
    }

    /// Get the configuration file path
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the configuration file, or defaults when it does not exist.
    pub fn load_or_default(&self) -> ClientResult<ClientConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::debug!(
                "No configuration file at {}, using defaults",
                self.config_path.display()
            );
            Ok(ClientConfiguration::default())
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create_default(&self) -> ClientResult<ClientConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::info!(
                "Configuration file not found, creating default: {}",
                self.config_path.display()
            );
            let default_config = ClientConfiguration::default();
            self.save(&default_config)?;
            Ok(default_config)
        }
    }

    /// Load configuration from file
    pub fn load(&self) -> ClientResult<ClientConfiguration> {
        log::info!("Loading configuration from: {}", self.config_path.display());

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            ClientError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let config: ClientConfiguration = toml::from_str(&content).map_err(|e| {
            ClientError::ConfigurationError(format!("Failed to parse config file: {e}"))
        })?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &ClientConfiguration) -> ClientResult<()> {
        validate_config(config)?;
        log::info!("Saving configuration to: {}", self.config_path.display());

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ClientError::ConfigurationError(format!(
                        "Failed to create config directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let content = toml::to_string_pretty(config).map_err(|e| {
            ClientError::ConfigurationError(format!("Failed to serialize config: {e}"))
        })?;

        fs::write(&self.config_path, content).map_err(|e| {
            ClientError::ConfigurationError(format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Update a specific configuration value
    pub fn update_value(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut config = self.load_or_default()?;

        match key {
            "base_url" => {
                EndpointUrl::new(value)?;
                config.base_url = value.to_string();
            }
            "timeout_seconds" => {
                config.timeout_seconds = value.parse().map_err(|_| {
                    ClientError::ConfigurationError(format!("Invalid timeout: {value}"))
                })?;
            }
            "body_encoding" => {
                config.body_encoding = value.parse().map_err(ClientError::ConfigurationError)?;
            }
            "value_split" => {
                config.value_split = value.parse().map_err(ClientError::ConfigurationError)?;
            }
            "app_id" | "app_secret" => {
                return Err(ClientError::ConfigurationError(format!(
                    "{key} is not stored; pass it on the command line"
                )));
            }
            _ => {
                return Err(ClientError::ConfigurationError(format!(
                    "Unknown configuration key: {key}"
                )));
            }
        }

        self.save(&config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate configuration values
fn validate_config(config: &ClientConfiguration) -> ClientResult<()> {
    EndpointUrl::new(&config.base_url)?;

    if config.timeout_seconds == 0 {
        return Err(ClientError::ConfigurationError(
            "Timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
