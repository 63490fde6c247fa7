#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for winst
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/winst/config.toml)
//! - Environment variables
//! - CLI flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use winst_errors::{ConfigError, Error};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Installer invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Installer program to invoke
    #[serde(default = "default_installer_program")]
    pub program: String,
    /// Arguments the launcher inserts before the per-request argument list
    #[serde(default = "default_leading_args")]
    pub leading_args: Vec<String>,
    /// Directory for downloaded artifacts (default: OS temp directory)
    pub temp_dir: Option<PathBuf>,
    /// Directory for installer log files (default: OS temp directory)
    pub log_dir: Option<PathBuf>,
    /// Bound on the installer wait; absent means wait forever
    pub timeout_seconds: Option<u64>,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Bound on the whole download; absent means wait forever
    pub timeout_seconds: Option<u64>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            program: default_installer_program(),
            leading_args: default_leading_args(),
            temp_dir: None,
            log_dir: None,
            timeout_seconds: None, // wait forever
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None, // wait forever
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// Default value functions for serde

fn default_installer_program() -> String {
    "msiexec".to_string()
}

fn default_leading_args() -> Vec<String> {
    vec!["/i".to_string()]
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("winst/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("winst").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // WINST_INSTALLER
        if let Ok(program) = std::env::var("WINST_INSTALLER") {
            if program.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "WINST_INSTALLER".to_string(),
                    value: program,
                }
                .into());
            }
            self.install.program = program;
        }

        // WINST_TEMP_DIR
        if let Ok(dir) = std::env::var("WINST_TEMP_DIR") {
            self.install.temp_dir = Some(PathBuf::from(dir));
        }

        // WINST_LOG_DIR
        if let Ok(dir) = std::env::var("WINST_LOG_DIR") {
            self.install.log_dir = Some(PathBuf::from(dir));
        }

        // WINST_INSTALL_TIMEOUT
        if let Ok(seconds) = std::env::var("WINST_INSTALL_TIMEOUT") {
            self.install.timeout_seconds =
                Some(seconds.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "WINST_INSTALL_TIMEOUT".to_string(),
                    value: seconds,
                })?);
        }

        // WINST_NETWORK_TIMEOUT
        if let Ok(seconds) = std::env::var("WINST_NETWORK_TIMEOUT") {
            self.network.timeout_seconds =
                Some(seconds.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "WINST_NETWORK_TIMEOUT".to_string(),
                    value: seconds,
                })?);
        }

        self.validate()?;
        Ok(())
    }

    /// Validate field values
    ///
    /// # Errors
    ///
    /// Returns an error if a field holds a value the workflow cannot use.
    pub fn validate(&self) -> Result<(), Error> {
        if self.install.program.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "install.program must not be empty".to_string(),
            }
            .into());
        }
        if self.install.timeout_seconds == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "install.timeout_seconds".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.network.timeout_seconds == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "network.timeout_seconds".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Get the artifact temp directory (with default)
    #[must_use]
    pub fn temp_dir(&self) -> PathBuf {
        self.install
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Get the installer log directory (with default)
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.install.log_dir.clone().unwrap_or_else(|| self.temp_dir())
    }
}
