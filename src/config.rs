//! User configuration: where the transaction sheet lives and how to report on it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CURRENCY: &str = "UGX";
pub const DEFAULT_FORECAST_HORIZON_DAYS: u32 = 30;
/// Longest forecast horizon accepted from the command line or the config file.
pub const MAX_FORECAST_HORIZON_DAYS: u32 = 36_500;
const CONFIG_DIR_NAME: &str = "sente";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration in {path}: {message}")]
    Serde { path: PathBuf, message: String },

    #[error("Invalid value for {field} in {path}: {message}")]
    Invalid {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the transaction sheet export (.csv or .json)
    pub store: Option<PathBuf>,
    /// Currency label shown next to amounts
    pub currency: String,
    /// Days projected by `forecast` when `--days` is not given
    pub forecast_horizon_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: None,
            currency: DEFAULT_CURRENCY.to_string(),
            forecast_horizon_days: DEFAULT_FORECAST_HORIZON_DAYS,
        }
    }
}

/// Locates and loads [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// `<config_dir>/sente/config.json`, if the platform has a config directory.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the configuration; a missing file yields the defaults.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.config_path).map_err(|source| ConfigError::Io {
            path: self.config_path.clone(),
            source,
        })?;
        let config: Config = serde_json::from_str(&data).map_err(|err| ConfigError::Serde {
            path: self.config_path.clone(),
            message: err.to_string(),
        })?;

        if config.forecast_horizon_days > MAX_FORECAST_HORIZON_DAYS {
            return Err(ConfigError::Invalid {
                path: self.config_path.clone(),
                field: "forecast_horizon_days",
                message: format!(
                    "{} exceeds the maximum of {} days",
                    config.forecast_horizon_days, MAX_FORECAST_HORIZON_DAYS
                ),
            });
        }
        Ok(config)
    }
}
