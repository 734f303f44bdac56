//! Configuration management for the tagtrend service
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. The dataset path and the tag color table are
//! plain configuration here, not constants in the aggregation logic, so
//! tests and deployments can point the service at fixture datasets.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web server configuration
    pub server: ServerConfig,

    /// Dataset and aggregation configuration
    pub dataset: DatasetConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Enable CORS for the API
    pub enable_cors: bool,

    /// Enable per-request tracing
    pub enable_request_logging: bool,

    /// Directory holding the dashboard page
    pub static_dir: PathBuf,
}

/// Dataset and aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the question CSV file
    pub csv_path: PathBuf,

    /// How many top tags the report keeps
    pub top_tags: usize,

    /// Fixed tag -> hex color table handed to the dashboard
    pub tag_colors: HashMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".parse().unwrap(),
            enable_cors: true,
            enable_request_logging: true,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/questions_sample.csv"),
            top_tags: crate::analytics::DEFAULT_TOP_TAGS,
            tag_colors: default_tag_colors(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

/// The fixed color table for the tags the dashboard knows about.
///
/// Purely a presentation concern; tags outside this table are served with a
/// null color and the client picks a fallback.
pub fn default_tag_colors() -> HashMap<String, String> {
    [
        ("python", "#377eb8"),
        ("java", "#ff7f00"),
        ("javascript", "#4daf4a"),
        ("c++", "#984ea3"),
        ("c#", "#e41a1c"),
        ("html", "#f781bf"),
        ("css", "#a65628"),
        ("react", "#fdae61"),
        ("angular", "#66c2a5"),
        ("flutter", "#d73027"),
    ]
    .into_iter()
    .map(|(tag, color)| (tag.to_string(), color.to_string()))
    .collect()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let bind_address = std::env::var("TAGTREND_BIND_ADDRESS")
            .ok()
            .and_then(|v| v.parse::<SocketAddr>().ok())
            .unwrap_or(defaults.server.bind_address);

        let static_dir = std::env::var("TAGTREND_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.server.static_dir);

        let csv_path = std::env::var("TAGTREND_CSV_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.dataset.csv_path);

        let top_tags = std::env::var("TAGTREND_TOP_TAGS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.dataset.top_tags);

        let level = std::env::var("TAGTREND_LOG_LEVEL").unwrap_or(defaults.logging.level);

        let format = std::env::var("TAGTREND_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            server: ServerConfig {
                bind_address,
                enable_cors: defaults.server.enable_cors,
                enable_request_logging: defaults.server.enable_request_logging,
                static_dir,
            },
            dataset: DatasetConfig {
                csv_path,
                top_tags,
                tag_colors: defaults.dataset.tag_colors,
            },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a TOML file.
    ///
    /// Missing sections and fields fill in from the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::config(format!("failed to parse config file {}: {e}", path.display()))
        })?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.dataset.top_tags == 0 {
            return Err(Error::config("top_tags must be greater than 0"));
        }

        if self.dataset.csv_path.as_os_str().is_empty() {
            return Err(Error::config("csv_path must not be empty"));
        }

        if self.server.static_dir.as_os_str().is_empty() {
            return Err(Error::config("static_dir must not be empty"));
        }

        Ok(())
    }
}
