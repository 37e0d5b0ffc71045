use crate::config::Config;

/// Validate the multiplier table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_multipliers(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (team, multiplier) in &config.multipliers {
        if team.trim().is_empty() {
            errors.push("multipliers: team name must not be blank".to_string());
        }
        if !multiplier.is_finite() {
            errors.push(format!("multipliers.{}: must be a finite number", team));
        } else if *multiplier < 0.0 {
            errors.push(format!("multipliers.{}: must be non-negative", team));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(entries: &[(&str, f64)]) -> Config {
        Config {
            multipliers: entries
                .iter()
                .map(|(team, mult)| (team.to_string(), *mult))
                .collect(),
            double_points: None,
        }
    }

    #[test]
    fn test_valid_table() {
        let config = config_with(&[("red bull", 2.0), ("haas", 1.0)]);
        assert!(validate_multipliers(&config).is_ok());
    }

    #[test]
    fn test_empty_table_is_valid() {
        let config = config_with(&[]);
        assert!(validate_multipliers(&config).is_ok());
    }

    #[test]
    fn test_negative_multiplier() {
        let config = config_with(&[("haas", -1.0)]);
        let errors = validate_multipliers(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("multipliers.haas"));
        assert!(errors[0].contains("non-negative"));
    }

    #[test]
    fn test_non_finite_multiplier() {
        let config = config_with(&[("haas", f64::NAN)]);
        let errors = validate_multipliers(&config).unwrap_err();
        assert!(errors[0].contains("finite"));
    }

    #[test]
    fn test_blank_team_name() {
        let config = config_with(&[("  ", 2.0)]);
        let errors = validate_multipliers(&config).unwrap_err();
        assert!(errors[0].contains("blank"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = config_with(&[("alpine", f64::INFINITY), ("haas", -2.0)]);
        let errors = validate_multipliers(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
