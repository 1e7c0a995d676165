//! Owner decisions returned from the resolution loop.

use super::state::State;
use serde::{Deserialize, Serialize};

/// Answer to "what state should you be in now?".
///
/// `Keep` reports the current state as stable and lets the tick proceed to
/// steady-state behavior. `Goto` requests an immediate transition, after which
/// the owner is asked again within the same tick.
///
/// # Example
///
/// ```rust
/// use tickstate::core::Decision;
///
/// let stay: Decision<u8> = Decision::Keep;
/// assert!(stay.is_stable());
///
/// let go = Decision::goto_if(true, 3u8);
/// assert_eq!(go.target(), Some(3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision<S> {
    /// Stay in the current state.
    Keep,
    /// Transition into the given state.
    Goto(S),
}

impl<S: Copy> Decision<S> {
    /// `Goto(state)` when `condition` holds, `Keep` otherwise.
    pub fn goto_if(condition: bool, state: S) -> Self {
        if condition {
            Self::Goto(state)
        } else {
            Self::Keep
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// The requested state, if any.
    pub fn target(&self) -> Option<S> {
        match self {
            Self::Keep => None,
            Self::Goto(s) => Some(*s),
        }
    }

    /// Keep this decision if it requests a transition, otherwise evaluate
    /// `next`. Used to chain predicates in precedence order.
    pub fn or_else<F>(self, next: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Keep => next(),
            goto => goto,
        }
    }
}

impl<S: State> Decision<S> {
    /// Spell the decision as a `(state, stable)` pair relative to `current`.
    pub fn resolve(self, current: S) -> (S, bool) {
        match self {
            Self::Keep => (current, true),
            Self::Goto(s) => (s, false),
        }
    }
}

impl<S> Default for Decision<S> {
    fn default() -> Self {
        Self::Keep
    }
}
