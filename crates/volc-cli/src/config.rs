//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;
use volc_core::{ChannelSelection, DEFAULT_CARD, Selector};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Mixer settings
    #[serde(default)]
    pub mixer: MixerConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which control to operate on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixerConfig {
    /// ALSA card name (e.g., "default", "hw:1")
    #[serde(default = "default_card")]
    pub card: String,
    /// Simple control name
    #[serde(default = "default_selector")]
    pub selector: String,
    /// Simple control index
    #[serde(default)]
    pub index: u32,
    /// "all", a channel name, or a channel index
    #[serde(default = "default_channel")]
    pub channel: String,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            card: default_card(),
            selector: default_selector(),
            index: 0,
            channel: default_channel(),
        }
    }
}

impl MixerConfig {
    /// Parsed channel selection.
    ///
    /// # Errors
    /// Returns an error if `channel` names no known channel.
    pub fn channel_selection(&self) -> Result<ChannelSelection> {
        self.channel
            .parse()
            .with_context(|| format!("Invalid channel in config: {:?}", self.channel))
    }
}

fn default_card() -> String {
    DEFAULT_CARD.to_string()
}

fn default_selector() -> String {
    Selector::DEFAULT_NAME.to_string()
}

fn default_channel() -> String {
    "all".to_string()
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Load configuration from `path`, or from the default location.
///
/// An explicitly given file must exist; a missing default file means
/// defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(default) = config_path() else {
                debug!("No config directory available, using defaults");
                return Ok(Config::default());
            };
            if !default.exists() {
                debug!(config_path = ?default, "Config file not found, using defaults");
                return Ok(Config::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {config_path:?}"))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {config_path:?}"))?;
    Ok(config)
}

/// Get the default configuration file path.
fn config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("org", "volc", "volc")?;
    Some(dirs.config_dir().join("config.toml"))
}
