use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::scoring::DriverResultRecord;

/// The document handed to the persistence/aggregation layer.
///
/// `double_points` is carried for the downstream standings aggregator; the
/// per-driver scores inside `results` are never pre-multiplied by it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    pub race_id: String,
    pub double_points: bool,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_started: Option<DateTime<Utc>>,
    pub results: Vec<DriverResultRecord>,
}

/// Write a result envelope to a JSON file atomically
///
/// Uses atomic-write-file so a crash mid-write never leaves the downstream
/// layer a truncated document. Creates parent directories as needed.
pub fn write_results(path: &Path, envelope: &ResultEnvelope) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, envelope).context("Failed to serialize results")?;

    file.commit().context("Failed to save results")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn sample_record() -> DriverResultRecord {
        DriverResultRecord {
            race_id: "round-3".to_string(),
            driver_number: 44,
            livery: "Mercedes".to_string(),
            qualification: 2,
            position: 1,
            fastest_lap: "1:29.337".to_string(),
            result_status: "FINISHED".to_string(),
            score_penalties: 0,
            score_grid_position: 5,
            score_delta_leader: 5,
            score_overtakes: -2,
            score_laps_completed: 0,
            score_finish_status: 0,
            final_race_score: 3.0,
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let temp_path = env::temp_dir().join("race_tally_test_results.json");
        let _ = std::fs::remove_file(&temp_path);

        let envelope = ResultEnvelope {
            race_id: "round-3".to_string(),
            double_points: true,
            generated_at: Utc::now(),
            track_name: Some("Monza".to_string()),
            session_started: Some(Utc::now()),
            results: vec![sample_record()],
        };

        write_results(&temp_path, &envelope).unwrap();

        let content = std::fs::read_to_string(&temp_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["raceId"], "round-3");
        assert_eq!(value["doublePoints"], true);
        assert_eq!(value["trackName"], "Monza");
        assert!(value.get("sessionStarted").is_some());
        assert_eq!(value["results"][0]["driverNumber"], 44);
        assert_eq!(value["results"][0]["scoreGridPosition"], 5);
        assert_eq!(value["results"][0]["finalRaceScore"], 3.0);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_track_name_omitted_when_absent() {
        let temp_path = env::temp_dir().join("race_tally_test_results_no_track.json");
        let _ = std::fs::remove_file(&temp_path);

        let envelope = ResultEnvelope {
            race_id: "round-4".to_string(),
            double_points: false,
            generated_at: Utc::now(),
            track_name: None,
            session_started: None,
            results: vec![],
        };

        write_results(&temp_path, &envelope).unwrap();

        let content = std::fs::read_to_string(&temp_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.get("trackName").is_none());
        assert!(value.get("sessionStarted").is_none());
        assert_eq!(value["results"].as_array().unwrap().len(), 0);

        let _ = std::fs::remove_file(&temp_path);
    }
}
