//! Read-only view of a machine handed to owner callbacks.

use crate::core::State;

/// What an owner may consult about its own machine while deciding or acting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateContext<S: State> {
    /// The state the machine currently records
    pub current: S,
    /// Simulated seconds since the last transition into `current`
    pub elapsed: f64,
    /// Ticks completed by the machine so far
    pub tick: u64,
}

impl<S: State> StateContext<S> {
    /// Strictly more than `seconds` have passed in the current state.
    pub fn elapsed_exceeds(&self, seconds: f64) -> bool {
        self.elapsed > seconds
    }

    /// No time has passed since entering the current state, i.e. the state
    /// was entered during this tick.
    pub fn just_entered(&self) -> bool {
        self.elapsed == 0.0
    }
}
