use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// League configuration.
///
/// Supplies the team multiplier table and the race-weekend defaults that
/// travel with each submission.
///
/// Example YAML:
/// ```yaml
/// multipliers:
///   "red bull": 2
///   haas: 1
/// double_points: false
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Team name -> score multiplier. Names are matched case-insensitively
    /// against the export's team ids; missing teams multiply by 1.
    #[serde(default)]
    pub multipliers: BTreeMap<String, f64>,

    /// Whether this event awards double points. Recorded alongside the
    /// results for the standings aggregator; never applied to the scores
    /// themselves.
    #[serde(default)]
    pub double_points: Option<bool>,
}
