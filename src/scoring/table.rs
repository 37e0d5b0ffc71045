use std::collections::HashMap;

/// Team-name -> multiplier lookup with normalized keys.
///
/// Keys are lower-cased and trimmed on insert and on lookup, so case drift
/// between the config file and the telemetry export never silently drops a
/// team onto the default. Teams without an entry multiply by 1.
#[derive(Debug, Clone, Default)]
pub struct MultiplierTable {
    entries: HashMap<String, f64>,
}

impl MultiplierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplier for a team, defaulting to 1 for absent entries.
    pub fn get(&self, team_id: &str) -> f64 {
        self.entries
            .get(&normalize(team_id))
            .copied()
            .unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for MultiplierTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(team, mult)| (normalize(team.as_ref()), mult))
                .collect(),
        }
    }
}

fn normalize(team_id: &str) -> String {
    team_id.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_team_defaults_to_one() {
        let table = MultiplierTable::new();
        assert_eq!(table.get("Haas"), 1.0);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table: MultiplierTable = [("red bull".to_string(), 2.0)].into_iter().collect();
        assert_eq!(table.get("Red Bull"), 2.0);
        assert_eq!(table.get("RED BULL"), 2.0);
        assert_eq!(table.get(" red bull "), 2.0);
    }

    #[test]
    fn test_keys_normalized_on_insert() {
        let table: MultiplierTable = [(" Red Bull ".to_string(), 3.0)].into_iter().collect();
        assert_eq!(table.get("red bull"), 3.0);
        assert_eq!(table.len(), 1);
    }
}
