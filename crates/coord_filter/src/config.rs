//! Configuration management for the coordinate filter.
//!
//! This module handles loading, validation, and conversion of the tool's
//! configuration from a TOML file and command-line overrides.

use coord_filter_core::{
    DirectoryWorldGateway, HttpWorldGateway, Separator, WorldDataGateway,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where world data comes from
    pub world: WorldSettings,
    /// Filter defaults
    #[serde(default)]
    pub filter: FilterSettings,
    /// Logging configuration settings
    pub logging: LoggingSettings,
}

/// Kind of world data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldSource {
    /// Download the tables from the world server
    Http,
    /// Read the tables from a local directory
    Directory,
}

/// World data source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSettings {
    /// Which source to read from
    pub source: WorldSource,
    /// World base URL, e.g. "https://en140.tribalwars.net"
    pub base_url: String,
    /// Directory holding village.txt, player.txt and ally.txt
    #[serde(default = "default_directory")]
    pub directory: String,
    /// HTTP request timeout in seconds (0 waits forever)
    #[serde(default)]
    pub timeout_secs: u64,
}

fn default_directory() -> String {
    "world".to_string()
}

fn default_separator() -> String {
    Separator::default().to_string()
}

/// Defaults applied to every filter run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Coordinate separator, "|" or ","
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

/// Logging system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output logs in JSON format
    pub json_format: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldSettings {
                source: WorldSource::Http,
                base_url: "https://en140.tribalwars.net".to_string(),
                directory: default_directory(),
                timeout_secs: 0,
            },
            filter: FilterSettings::default(),
            logging: LoggingSettings {
                level: "info".to_string(),
                json_format: false,
            },
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration to `path`
    /// and returns it.
    pub async fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Loads configuration for a run.
    ///
    /// An existing file must read and parse; any failure is returned. A
    /// missing file is created with defaults, and when that write fails the
    /// defaults are used without a file.
    pub async fn load_or_default(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            return Self::load_from_file(path).await;
        }

        match Self::load_from_file(path).await {
            Ok(config) => Ok(config),
            Err(e) => {
                eprintln!(
                    "⚠️ Could not create {}: {e}, using defaults",
                    path.display()
                );
                Ok(AppConfig::default())
            }
        }
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), String> {
        match self.world.source {
            WorldSource::Http => {
                let url = self.world.base_url.as_str();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(format!(
                        "Invalid world base_url: {url}. Must start with http:// or https://"
                    ));
                }
            }
            WorldSource::Directory => {
                if self.world.directory.is_empty() {
                    return Err("World directory cannot be empty".to_string());
                }
                if !Path::new(&self.world.directory).is_dir() {
                    return Err(format!(
                        "World directory does not exist: {}",
                        self.world.directory
                    ));
                }
            }
        }

        if let Err(e) = self.filter.separator.parse::<Separator>() {
            return Err(format!("Invalid filter separator: {e}"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }

    /// Request timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.world.timeout_secs > 0).then(|| Duration::from_secs(self.world.timeout_secs))
    }

    /// Builds the world data gateway described by this configuration.
    pub fn to_gateway(&self) -> Result<Box<dyn WorldDataGateway>, Box<dyn std::error::Error>> {
        let gateway: Box<dyn WorldDataGateway> = match self.world.source {
            WorldSource::Http => Box::new(HttpWorldGateway::new(&self.world.base_url, self.timeout())?),
            WorldSource::Directory => {
                Box::new(DirectoryWorldGateway::new(PathBuf::from(&self.world.directory)))
            }
        };
        Ok(gateway)
    }
}
