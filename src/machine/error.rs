//! Errors raised by the driver.

use thiserror::Error;

/// Contract violations detected while driving an owner.
///
/// These indicate programming faults in the host or the owner and are reported
/// instead of being papered over with a default state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("Machine '{label}' advanced before activate()")]
    NotActivated { label: String },

    #[error("Tick delta must be finite and positive (got {delta})")]
    InvalidDelta { delta: f64 },

    #[error("Owner of machine '{label}' requested undeclared state '{state}'")]
    UnknownState { label: String, state: String },
}
