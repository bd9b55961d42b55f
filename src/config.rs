use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::geo::{GeocodeQuery, NominatimGeocoder};
use crate::render::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("no location history path given and $HOME is not set")]
    MissingHistory,
    #[error("no home location given")]
    MissingHome,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub history: Option<PathBuf>,
    #[serde(default)]
    pub home: Option<GeocodeQuery>,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    NominatimGeocoder::DEFAULT_URL.to_string()
}

fn default_user_agent() -> String {
    "location distance histogram".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_bins")]
    pub bins: usize,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            format: OutputFormat::default(),
        }
    }
}

fn default_bins() -> usize {
    10
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        // an empty document deserializes to unit, not a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Explicit history path, falling back to the Takeout default.
    pub fn history_path(&self) -> Result<PathBuf, ConfigError> {
        self.history
            .clone()
            .or_else(crate::history::default_history_path)
            .ok_or(ConfigError::MissingHistory)
    }

    pub fn home(&self) -> Result<&GeocodeQuery, ConfigError> {
        self.home.as_ref().ok_or(ConfigError::MissingHome)
    }
}
