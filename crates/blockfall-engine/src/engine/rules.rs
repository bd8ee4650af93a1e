use serde::{Deserialize, Serialize};

use crate::RulesError;

/// Timing and level parameters of a session.
///
/// All durations are in seconds. Every field has a default, so a rules file only
/// needs the values it changes:
///
/// ```
/// use blockfall_engine::Rules;
///
/// let rules: Rules = serde_json::from_str(r#"{ "starting_level": 5 }"#).unwrap();
/// assert_eq!(rules.starting_level, 5);
/// assert_eq!(rules.lock_delay, Rules::default().lock_delay);
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Level of a fresh session.
    pub starting_level: u32,
    /// Gravity interval at level 1.
    pub gravity_interval: f64,
    /// How much faster gravity gets with each level.
    pub gravity_step: f64,
    /// Gravity interval while soft drop is held.
    pub soft_drop_interval: f64,
    /// Grace period between a piece coming to rest and it being locked.
    pub lock_delay: f64,
    /// How long a direction must be held before it auto-repeats.
    pub das_delay: f64,
    /// Interval between auto-repeat moves.
    pub das_repeat_interval: f64,
    /// Cleared lines needed to advance one level.
    pub lines_per_level: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_level: 1,
            gravity_interval: 0.8,
            gravity_step: 0.007,
            soft_drop_interval: 0.05,
            lock_delay: 0.5,
            das_delay: 0.133,
            das_repeat_interval: 0.05,
            lines_per_level: 10,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), RulesError> {
        let durations = [
            ("gravity_interval", self.gravity_interval),
            ("gravity_step", self.gravity_step),
            ("soft_drop_interval", self.soft_drop_interval),
            ("lock_delay", self.lock_delay),
            ("das_delay", self.das_delay),
            ("das_repeat_interval", self.das_repeat_interval),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(RulesError::InvalidDuration(name));
            }
        }
        if self.starting_level == 0 {
            return Err(RulesError::ZeroStartingLevel);
        }
        if self.lines_per_level == 0 {
            return Err(RulesError::ZeroLinesPerLevel);
        }
        Ok(())
    }

    /// Seconds between gravity steps at `level`, clamped at zero.
    #[must_use]
    pub fn gravity_interval_at(&self, level: u32) -> f64 {
        let speedup = f64::from(level.saturating_sub(1)) * self.gravity_step;
        (self.gravity_interval - speedup).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        assert_eq!(Rules::default().validate(), Ok(()));
    }

    #[test]
    fn test_gravity_interval_per_level() {
        let rules = Rules::default();
        assert!((rules.gravity_interval_at(1) - 0.8).abs() < 1e-9);
        assert!((rules.gravity_interval_at(2) - 0.793).abs() < 1e-9);
        assert!((rules.gravity_interval_at(11) - 0.73).abs() < 1e-9);
    }

    #[test]
    fn test_gravity_interval_never_negative() {
        let rules = Rules::default();
        assert!(rules.gravity_interval_at(200).abs() < f64::EPSILON);
        assert!(rules.gravity_interval_at(u32::MAX) >= 0.0);
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let rules: Rules = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn test_json_round_trip_keeps_field_names() {
        let json = serde_json::to_value(Rules::default()).unwrap();
        assert_eq!(json["das_delay"], serde_json::json!(0.133));
        assert_eq!(json["lines_per_level"], serde_json::json!(10));
        let back: Rules = serde_json::from_value(json).unwrap();
        assert_eq!(back, Rules::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = serde_json::from_str::<Rules>(r#"{ "gravity": 1.0 }"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let rules = Rules {
            lock_delay: -0.1,
            ..Rules::default()
        };
        assert_eq!(
            rules.validate(),
            Err(RulesError::InvalidDuration("lock_delay"))
        );

        let rules = Rules {
            das_delay: f64::NAN,
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::InvalidDuration("das_delay")));

        let rules = Rules {
            starting_level: 0,
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::ZeroStartingLevel));

        let rules = Rules {
            lines_per_level: 0,
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::ZeroLinesPerLevel));
    }
}
