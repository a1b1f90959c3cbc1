use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

/// How event identifiers are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Subject stamped on events when --subject is not given
    pub subject: Option<String>,

    #[serde(default)]
    pub ids: IdStrategy,

    /// Prefix for sequential identifiers
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,

    /// Log level when --verbose is not given (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            subject: None,
            ids: IdStrategy::default(),
            id_prefix: default_id_prefix(),
            pretty: false,
            log_level: default_log_level(),
        }
    }
}

fn default_id_prefix() -> String {
    "evt".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Get the config file path (~/.config/planimport/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("planimport");
    Ok(config_dir.join("config.toml"))
}

/// Load config from ~/.config/planimport/config.toml, or defaults if absent
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    parse_config(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))
}

fn parse_config(contents: &str) -> Result<Config> {
    Ok(toml::from_str(contents)?)
}
