use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use super::table::MultiplierTable;
use super::tiers;
use crate::telemetry::types::{DriverClassification, OvertakeRecord, RaceTelemetryExport};

/// Structural rejection: a section the scoring rules cannot run without is
/// absent from the export. Soft gaps (missing delta, unknown team, zero
/// overtake records) never produce this; they resolve to tier defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("telemetry export is missing required section `{0}`")]
    MissingSection(&'static str),
}

/// Per-driver scoring outcome for one race. One record per classified
/// driver, identity and display fields carried through from the export.
///
/// `score_laps_completed` and `score_finish_status` are audit fields: the
/// value that actually entered the sum for the finish hierarchy is always
/// `score_delta_leader`. `score_grid_position` is likewise emitted for the
/// record but excluded from `final_race_score`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResultRecord {
    pub race_id: String,
    pub driver_number: u32,
    pub livery: String,
    pub qualification: i32,
    pub position: i32,
    pub fastest_lap: String,
    pub result_status: String,
    pub score_penalties: i32,
    pub score_grid_position: i32,
    pub score_delta_leader: i32,
    pub score_overtakes: i32,
    pub score_laps_completed: i32,
    pub score_finish_status: i32,
    pub final_race_score: f64,
}

/// Score one race export.
///
/// Pure and deterministic: no I/O, no clock, identical inputs always yield
/// identical records, in classification order. Either every driver is scored
/// or the export is rejected whole with a [`ScoreError`].
pub fn score_race(
    export: &RaceTelemetryExport,
    table: &MultiplierTable,
    race_id: &str,
) -> Result<Vec<DriverResultRecord>, ScoreError> {
    let total_laps = export
        .session_info
        .as_ref()
        .and_then(|s| s.total_laps)
        .ok_or(ScoreError::MissingSection("sessionInfo.totalLaps"))?;

    let drivers = export
        .classification_data
        .as_ref()
        .ok_or(ScoreError::MissingSection("classificationData"))?;

    let overtake_records = export
        .overtakes
        .as_ref()
        .map(|o| o.records.as_slice())
        .unwrap_or_default();

    let counts = overtake_counts(overtake_records);
    let field_max = field_max_overtakes(&counts, drivers);

    let records = drivers
        .iter()
        .map(|driver| score_driver(driver, total_laps, &counts, field_max, table, race_id))
        .collect();

    Ok(records)
}

/// Overtakes per normalized driver name, folded from the raw record stream.
/// Drivers never appearing as overtaker have no entry (an implicit 0).
fn overtake_counts(records: &[OvertakeRecord]) -> HashMap<String, u32> {
    records.iter().fold(HashMap::new(), |mut counts, record| {
        let key = record.overtaking_driver_name.trim().to_lowercase();
        *counts.entry(key).or_insert(0) += 1;
        counts
    })
}

/// Scoring baseline: the highest overtake count among drivers actually in
/// this race's classification. Counts keyed by names outside the field
/// (artifacts, other sessions) do not move the baseline.
fn field_max_overtakes(counts: &HashMap<String, u32>, drivers: &[DriverClassification]) -> u32 {
    drivers
        .iter()
        .filter_map(|d| counts.get(&d.name_key()).copied())
        .max()
        .unwrap_or(0)
}

fn score_driver(
    driver: &DriverClassification,
    total_laps: u32,
    counts: &HashMap<String, u32>,
    field_max: u32,
    table: &MultiplierTable,
    race_id: &str,
) -> DriverResultRecord {
    let fc = &driver.final_classification;

    let score_penalties = tiers::penalty_points(fc.penalties_time);
    let score_grid_position = tiers::grid_points(fc.grid_position);

    // DNF beats lapped beats delta; exactly one branch decides the summed
    // value, the other two fields of the triple are audit-only.
    let (score_delta_leader, score_laps_completed, score_finish_status) =
        if fc.result_status != "FINISHED" {
            (-3, 0, -3)
        } else if fc.num_laps < total_laps {
            (-2, -2, 0)
        } else {
            (tiers::delta_points(driver.delta_to_leader_ms()), 0, 0)
        };

    let count = counts.get(&driver.name_key()).copied().unwrap_or(0);
    let score_overtakes = tiers::overtake_points(count, field_max);

    // Grid position is logged but not summed.
    let raw_adjustment = score_penalties + score_delta_leader + score_overtakes;
    let multiplier = table.get(&driver.participant_data.team_id);
    let final_race_score = raw_adjustment as f64 * multiplier;

    DriverResultRecord {
        race_id: race_id.to_string(),
        driver_number: driver.participant_data.race_number,
        livery: driver.participant_data.team_id.clone(),
        qualification: fc.grid_position,
        position: fc.position,
        fastest_lap: fc.best_lap_time_str.clone(),
        result_status: fc.result_status.clone(),
        score_penalties,
        score_grid_position,
        score_delta_leader,
        score_overtakes,
        score_laps_completed,
        score_finish_status,
        final_race_score,
    }
}
