mod init;
mod schema;

pub use init::write_starter_config;
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/race-tally/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("race-tally")
}

/// Get the default config file path (~/.config/race-tally/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// An explicitly passed path must exist. The default path is allowed to be
/// absent: scoring works without a config, every team just multiplies by 1.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly passed config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path(), false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}
