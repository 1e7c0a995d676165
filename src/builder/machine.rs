//! Builder for constructing state machines.

use crate::builder::config::{into_errors, MachineConfig};
use crate::builder::error::BuildError;
use crate::core::State;
use crate::machine::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// Every setting is optional: the initial state defaults to the first declared
/// member of `S`, the cascade limit to the number of declared states, and the
/// label to the state type's name.
pub struct StateMachineBuilder<S: State> {
    label: Option<String>,
    initial: Option<S>,
    config: MachineConfig,
}

impl<S: State> StateMachineBuilder<S> {
    pub fn new() -> Self {
        Self {
            label: None,
            initial: None,
            config: MachineConfig::default(),
        }
    }

    /// Name used in logs and errors.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Override the state entered on activation.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace all settings at once, e.g. from a host config file.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cascade_limit(mut self, limit: usize) -> Self {
        self.config.cascade_limit = Some(limit);
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    pub fn trace_transitions(mut self, enabled: bool) -> Self {
        self.config.trace_transitions = enabled;
        self
    }

    /// Build the machine.
    /// Returns an error for an empty state set, an undeclared initial state,
    /// or an invalid configuration.
    pub fn build(self) -> Result<StateMachine<S>, BuildError> {
        let first = S::first().ok_or(BuildError::EmptyStateSet)?;

        let initial = self.initial.unwrap_or(first);
        if !initial.is_declared() {
            return Err(BuildError::InitialNotDeclared {
                state: format!("{initial:?}"),
            });
        }

        let errors = into_errors(self.config.validate());
        if !errors.is_empty() {
            return Err(BuildError::InvalidConfig(errors));
        }

        let label = self.label.unwrap_or_else(default_label::<S>);
        let cascade_limit = self.config.cascade_limit.unwrap_or_else(S::cardinality);

        Ok(StateMachine::from_parts(
            label,
            initial,
            cascade_limit,
            self.config.history_capacity,
            self.config.trace_transitions,
        ))
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn default_label<S>() -> String {
    let full = std::any::type_name::<S>();
    full.rsplit("::").next().unwrap_or(full).to_string()
}
