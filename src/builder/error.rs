//! Build and configuration errors.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("State set is empty. Declare at least one state")]
    EmptyStateSet,

    #[error("Initial state '{state}' is not a declared member of the state set")]
    InitialNotDeclared { state: String },

    #[error("Invalid configuration: {}", render(.0))]
    InvalidConfig(Vec<ConfigError>),
}

/// Problems found while validating a configuration.
///
/// Validation reports every problem at once rather than stopping at the first.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("cascade_limit must be at least 1")]
    ZeroCascadeLimit,

    #[error("cascade_limit {requested} exceeds the maximum of {max}")]
    CascadeLimitTooLarge { requested: usize, max: usize },

    #[error("history_capacity {requested} exceeds the maximum of {max}")]
    HistoryCapacityTooLarge { requested: usize, max: usize },

    #[error("fixed_delta must be finite and positive (got {0})")]
    NonPositiveFixedDelta(f64),

    #[error("max_steps_per_frame must be at least 1")]
    ZeroStepsPerFrame,
}

fn render(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_lists_every_problem() {
        let err = BuildError::InvalidConfig(vec![
            ConfigError::ZeroCascadeLimit,
            ConfigError::HistoryCapacityTooLarge {
                requested: 10,
                max: 5,
            },
        ]);

        assert_eq!(
            err.to_string(),
            "Invalid configuration: cascade_limit must be at least 1; \
             history_capacity 10 exceeds the maximum of 5"
        );
    }
}
