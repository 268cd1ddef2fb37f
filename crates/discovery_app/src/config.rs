use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use discovery_core::{Category, Sort, User};
use discovery_engine::ApiSettings;
use discovery_logging::discovery_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogDestination;

pub const CONFIG_ENV: &str = "DISCOVERY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./discovery.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
    pub preference_path: PathBuf,
    pub log_destination: LogDestination,
    pub seed_sort: Sort,
    pub root_categories: Vec<Category>,
    /// Identity to start logged in as; `None` starts logged out.
    pub user: Option<User>,
    pub settle_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base_url: api.base_url,
            connect_timeout_ms: api.connect_timeout.as_millis() as u64,
            request_timeout_ms: api.request_timeout.as_millis() as u64,
            max_response_bytes: api.max_bytes,
            preference_path: PathBuf::from("./activity_sample.ron"),
            log_destination: LogDestination::default(),
            seed_sort: Sort::Home,
            root_categories: Vec::new(),
            user: None,
            settle_timeout_ms: 10_000,
        }
    }
}

impl AppConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_response_bytes,
            ..ApiSettings::default()
        }
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }
}

/// Config path from `DISCOVERY_CONFIG`, or `./discovery.ron`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Loads the config; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            discovery_info!("No config at {:?}; using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
