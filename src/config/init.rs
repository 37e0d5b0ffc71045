use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::get_config_path;

const STARTER_CONFIG: &str = "\
# race-tally configuration
#
# Team score multipliers. Names are matched case-insensitively against the
# teamId in the telemetry export; teams not listed here multiply by 1.
multipliers:
  \"red bull\": 1
  ferrari: 1
  mercedes: 1
  mclaren: 1
  haas: 1

# Default for events that award double points. The flag is recorded with the
# exported results for the standings aggregator; it does not change the
# per-race scores. Override per run with --double-points.
double_points: false
";

/// Write a commented starter config.
///
/// Refuses to overwrite an existing file. Returns the path written to.
pub fn write_starter_config(path: Option<PathBuf>) -> Result<PathBuf> {
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() {
        anyhow::bail!(
            "Config already exists at {}. Remove it first to re-init.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, STARTER_CONFIG)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(config_path)
}
