use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::types::RaceTelemetryExport;

/// Load a race telemetry export from a JSON file
///
/// # Errors
///
/// Returns an error if:
/// - The export file does not exist
/// - The export file cannot be read
/// - The JSON cannot be parsed
pub fn load_export(path: &Path) -> Result<RaceTelemetryExport> {
    if !path.exists() {
        anyhow::bail!("Telemetry export not found at {}", path.display());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open telemetry export at {}", path.display()))?;

    let export: RaceTelemetryExport = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse telemetry export: invalid JSON in {}", path.display()))?;

    Ok(export)
}
