use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One race session's telemetry/classification export, as produced by the
/// league's session capture. Field names follow the wire document (camelCase).
///
/// `sessionInfo` and `classificationData` are required for scoring but are
/// modelled as `Option` so a partial document still parses; the scoring
/// engine rejects the export with a structural error naming the missing
/// section instead of a bare JSON parse failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceTelemetryExport {
    #[serde(default)]
    pub session_info: Option<SessionInfo>,
    #[serde(default)]
    pub classification_data: Option<Vec<DriverClassification>>,
    #[serde(default)]
    pub overtakes: Option<Overtakes>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// Laps scheduled for the race.
    #[serde(default)]
    pub total_laps: Option<u32>,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub session_started: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverClassification {
    pub driver_name: String,
    pub participant_data: ParticipantData,
    pub final_classification: FinalClassification,
    #[serde(default)]
    pub lap_data: Option<LapData>,
}

impl DriverClassification {
    /// Name key used for joining against overtake records.
    pub fn name_key(&self) -> String {
        self.driver_name.trim().to_lowercase()
    }

    /// Gap to the race leader, if the capture recorded one.
    pub fn delta_to_leader_ms(&self) -> Option<u64> {
        self.lap_data.as_ref().and_then(|l| l.delta_to_race_leader_in_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantData {
    /// Team identifier; doubles as the livery and the multiplier-table key.
    pub team_id: String,
    /// Car number, the stable driver identity downstream.
    pub race_number: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalClassification {
    pub grid_position: i32,
    pub position: i32,
    /// Total penalty time in seconds.
    pub penalties_time: f64,
    /// Laps actually completed.
    pub num_laps: u32,
    /// Only `"FINISHED"` is exempt from DNF scoring.
    pub result_status: String,
    pub best_lap_time_str: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapData {
    #[serde(default)]
    pub delta_to_race_leader_in_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overtakes {
    #[serde(default)]
    pub records: Vec<OvertakeRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertakeRecord {
    pub overtaking_driver_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_export_parse() {
        let json = r#"{
            "sessionInfo": { "totalLaps": 50, "trackName": "Silverstone" },
            "classificationData": [
                {
                    "driverName": "Max Verstappen",
                    "participantData": { "teamId": "Red Bull", "raceNumber": 1 },
                    "finalClassification": {
                        "gridPosition": 1,
                        "position": 1,
                        "penaltiesTime": 0,
                        "numLaps": 50,
                        "resultStatus": "FINISHED",
                        "bestLapTimeStr": "1:27.097"
                    },
                    "lapData": { "deltaToRaceLeaderInMs": 0 }
                }
            ],
            "overtakes": { "records": [ { "overtakingDriverName": "Max Verstappen" } ] }
        }"#;

        let export: RaceTelemetryExport = serde_json::from_str(json).unwrap();
        assert_eq!(export.session_info.unwrap().total_laps, Some(50));

        let drivers = export.classification_data.unwrap();
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].participant_data.race_number, 1);
        assert_eq!(drivers[0].delta_to_leader_ms(), Some(0));
        assert_eq!(export.overtakes.unwrap().records.len(), 1);
    }

    #[test]
    fn test_missing_sections_still_parse() {
        // Structural checks belong to the engine, not the parser.
        let export: RaceTelemetryExport = serde_json::from_str("{}").unwrap();
        assert!(export.session_info.is_none());
        assert!(export.classification_data.is_none());
        assert!(export.overtakes.is_none());
    }

    #[test]
    fn test_absent_delta_is_none() {
        let json = r#"{
            "driverName": "Lance Stroll",
            "participantData": { "teamId": "Aston Martin", "raceNumber": 18 },
            "finalClassification": {
                "gridPosition": 14,
                "position": 12,
                "penaltiesTime": 0,
                "numLaps": 50,
                "resultStatus": "FINISHED",
                "bestLapTimeStr": "1:30.441"
            }
        }"#;

        let driver: DriverClassification = serde_json::from_str(json).unwrap();
        assert_eq!(driver.delta_to_leader_ms(), None);
    }

    #[test]
    fn test_name_key_normalizes() {
        let json = r#"{
            "driverName": "  Max VERSTAPPEN ",
            "participantData": { "teamId": "Red Bull", "raceNumber": 1 },
            "finalClassification": {
                "gridPosition": 1,
                "position": 1,
                "penaltiesTime": 0,
                "numLaps": 50,
                "resultStatus": "FINISHED",
                "bestLapTimeStr": "1:27.097"
            }
        }"#;

        let driver: DriverClassification = serde_json::from_str(json).unwrap();
        assert_eq!(driver.name_key(), "max verstappen");
    }
}
