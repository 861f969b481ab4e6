use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct SheetSource {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub spreadsheet_id: String,
    pub worksheet: String,
    pub api_key: String,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: i64,
}

#[derive(Deserialize)]
pub struct ModelParameters {
    pub model_path: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub sheet: SheetSource,
    pub model: ModelParameters,
    pub general: General,
}

fn default_endpoint() -> String {
    "https://sheets.googleapis.com".to_string()
}

/// The sensor rig appends a reading roughly every few minutes, so a snapshot
/// stays useful for hours
fn default_cache_ttl() -> i64 {
    16000
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    if config.sheet.cache_ttl_secs < 0 {
        return Err(ConfigError::from("cache_ttl_secs must not be negative"));
    }

    Ok(config)
}
