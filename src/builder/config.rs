//! Tunable settings for machines and the host scheduler.
//!
//! Both structs deserialize from JSON with every field optional, so hosts can
//! keep them in their own config files and only spell out overrides.

use crate::builder::error::ConfigError;
use crate::core::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Upper bound on retained history entries per machine.
pub const MAX_HISTORY_CAPACITY: usize = 4096;

/// Upper bound on transitions a single tick may cascade through.
pub const MAX_CASCADE_LIMIT: usize = 1024;

type Checked = Validation<(), NonEmptyVec<ConfigError>>;

/// Per-machine settings.
///
/// # Example
///
/// ```rust
/// use tickstate::builder::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "cascade_limit": 4 }"#).unwrap();
/// assert_eq!(config.cascade_limit, Some(4));
/// assert!(config.trace_transitions);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Transitions allowed in one tick before the loop is force-stabilized.
    /// `None` uses the number of declared states.
    pub cascade_limit: Option<usize>,

    /// Transitions retained for diagnostics. Zero disables history.
    pub history_capacity: usize,

    /// Log every transition at debug level (trace level when off).
    pub trace_transitions: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            cascade_limit: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            trace_transitions: true,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Check every setting, accumulating all problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let cascade: Checked = match self.cascade_limit {
            Some(0) => Validation::fail(ConfigError::ZeroCascadeLimit),
            Some(limit) if limit > MAX_CASCADE_LIMIT => {
                Validation::fail(ConfigError::CascadeLimitTooLarge {
                    requested: limit,
                    max: MAX_CASCADE_LIMIT,
                })
            }
            _ => Validation::success(()),
        };

        let history: Checked = if self.history_capacity > MAX_HISTORY_CAPACITY {
            Validation::fail(ConfigError::HistoryCapacityTooLarge {
                requested: self.history_capacity,
                max: MAX_HISTORY_CAPACITY,
            })
        } else {
            Validation::success(())
        };

        Validation::all_vec(vec![cascade, history]).map(|_| ())
    }
}

/// Fixed-timestep settings for [`Scheduler`](crate::host::Scheduler).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Simulated seconds per tick.
    pub fixed_delta: f64,

    /// Ticks run for a single frame before the backlog is dropped.
    pub max_steps_per_frame: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fixed_delta: 1.0 / 60.0,
            max_steps_per_frame: 8,
        }
    }
}

impl SchedulerConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let delta: Checked = if self.fixed_delta.is_finite() && self.fixed_delta > 0.0 {
            Validation::success(())
        } else {
            Validation::fail(ConfigError::NonPositiveFixedDelta(self.fixed_delta))
        };

        let steps: Checked = if self.max_steps_per_frame == 0 {
            Validation::fail(ConfigError::ZeroStepsPerFrame)
        } else {
            Validation::success(())
        };

        Validation::all_vec(vec![delta, steps]).map(|_| ())
    }
}

/// Flatten a failed validation into a plain list.
pub(crate) fn into_errors(result: Validation<(), NonEmptyVec<ConfigError>>) -> Vec<ConfigError> {
    match result {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MachineConfig::default().validate().is_success());
        assert!(SchedulerConfig::default().validate().is_success());
    }

    #[test]
    fn machine_config_accumulates_all_problems() {
        let config = MachineConfig {
            cascade_limit: Some(0),
            history_capacity: MAX_HISTORY_CAPACITY + 1,
            trace_transitions: false,
        };

        let errors = into_errors(config.validate());
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ConfigError::ZeroCascadeLimit));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::HistoryCapacityTooLarge { .. })));
    }

    #[test]
    fn oversized_cascade_limit_is_rejected() {
        let config = MachineConfig::from_json(r#"{ "cascade_limit": 18446744073709551615 }"#).unwrap();

        let errors = into_errors(config.validate());
        assert_eq!(
            errors,
            vec![ConfigError::CascadeLimitTooLarge {
                requested: usize::MAX,
                max: MAX_CASCADE_LIMIT,
            }]
        );

        let at_max = MachineConfig {
            cascade_limit: Some(MAX_CASCADE_LIMIT),
            ..MachineConfig::default()
        };
        assert!(at_max.validate().is_success());
    }

    #[test]
    fn scheduler_config_rejects_bad_delta() {
        let config = SchedulerConfig {
            fixed_delta: f64::NAN,
            max_steps_per_frame: 0,
        };

        let result = config.validate();
        assert!(result.is_failure());
        assert_eq!(into_errors(result).len(), 2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MachineConfig::from_json(r#"{ "history_capacity": 4 }"#).unwrap();
        assert_eq!(config.history_capacity, 4);
        assert_eq!(config.cascade_limit, None);
        assert!(config.trace_transitions);

        let scheduler = SchedulerConfig::from_json(r#"{ "fixed_delta": 0.02 }"#).unwrap();
        assert_eq!(scheduler.fixed_delta, 0.02);
        assert_eq!(scheduler.max_steps_per_frame, 8);
    }
}
