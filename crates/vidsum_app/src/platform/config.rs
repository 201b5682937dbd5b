use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vidsum_engine::ClientSettings;

use super::cli::Cli;
use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "vidsum.ron";
/// Overrides `api_url`, like the deployment variable of the web front end.
pub const API_URL_ENV: &str = "VIDSUM_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("Config validation failed: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub api_prefix: String,
    /// Where saved thumbnails are written.
    pub output_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_image_bytes: u64,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            api_url: client.base_url,
            api_prefix: client.api_prefix,
            output_dir: PathBuf::from("thumbnails"),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_image_bytes: client.max_image_bytes,
            log: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Reads a RON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
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

    /// Command line beats environment beats file.
    pub fn resolve(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::load(&cli.config)?.with_env(env).with_cli(cli).validated()
    }

    pub fn with_env(mut self, env: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = env(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
        self
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                message: format!("api_url must be an http(s) URL, got {:?}", self.api_url),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "request_timeout_secs must be positive".to_string(),
            });
        }
        Ok(self)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_url.clone(),
            api_prefix: self.api_prefix.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_image_bytes: self.max_image_bytes,
        }
    }
}
