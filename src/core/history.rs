//! Bounded record of recent state transitions.
//!
//! The history exists for diagnostics: it answers "what did this entity just
//! do?" when a behavior looks wrong. Only the most recent `capacity`
//! transitions are kept.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Record of a single state transition.
///
/// `from` is `None` for the activation transition into the initial state.
///
/// # Example
///
/// ```rust
/// use tickstate::core::StateTransition;
/// use tickstate::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Gait { Idle, Walk }
/// }
///
/// let transition = StateTransition {
///     from: Some(Gait::Idle),
///     to: Gait::Walk,
///     tick: 4,
///     elapsed_in_from: 3.0,
///     recorded_at: Utc::now(),
/// };
/// assert!(!transition.is_activation());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left, `None` on activation
    pub from: Option<S>,
    /// The state being entered
    pub to: S,
    /// Machine tick during which the transition happened
    pub tick: u64,
    /// Simulated seconds spent in `from` before leaving it
    pub elapsed_in_from: f64,
    /// Wall-clock time the transition was recorded
    pub recorded_at: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    pub fn is_activation(&self) -> bool {
        self.from.is_none()
    }
}

/// Ring buffer of the most recent transitions, oldest first.
///
/// A capacity of zero disables recording.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{StateHistory, StateTransition};
/// use tickstate::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Phase { One, Two, Three }
/// }
///
/// let mut history = StateHistory::with_capacity(8);
/// history.record(StateTransition {
///     from: None,
///     to: Phase::One,
///     tick: 0,
///     elapsed_in_from: 0.0,
///     recorded_at: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Some(Phase::One),
///     to: Phase::Two,
///     tick: 3,
///     elapsed_in_from: 0.05,
///     recorded_at: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![Phase::One, Phase::Two]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    capacity: usize,
    transitions: VecDeque<StateTransition<S>>,
}

/// Default number of transitions a machine remembers.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<S: State> StateHistory<S> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// States traversed, in order.
    ///
    /// Starts with the `from` state of the oldest retained transition (when it
    /// has one), followed by the `to` state of every transition.
    pub fn get_path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(from) = self.transitions.front().and_then(|t| t.from) {
            path.push(from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<S>> + '_ {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    /// Transitions recorded during the given tick.
    pub fn during_tick(&self, tick: u64) -> impl Iterator<Item = &StateTransition<S>> + '_ {
        self.transitions.iter().filter(move |t| t.tick == tick)
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Render the retained transitions as JSON for a diagnostics dump.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Run,
        Walk,
    }

    impl State for TestState {
        const ALL: &'static [Self] = &[Self::Idle, Self::Run, Self::Walk];

        fn name(&self) -> &'static str {
            match self {
                Self::Idle => "Idle",
                Self::Run => "Run",
                Self::Walk => "Walk",
            }
        }
    }

    fn transition(from: Option<TestState>, to: TestState, tick: u64) -> StateTransition<TestState> {
        StateTransition {
            from,
            to,
            tick,
            elapsed_in_from: 0.0,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::default();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.last().is_none());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn activation_path_starts_at_initial_state() {
        let mut history = StateHistory::with_capacity(4);
        history.record(transition(None, TestState::Idle, 0));
        history.record(transition(Some(TestState::Idle), TestState::Walk, 3));

        assert_eq!(history.get_path(), vec![TestState::Idle, TestState::Walk]);
        assert!(history.transitions().next().unwrap().is_activation());
    }

    #[test]
    fn oldest_transition_is_evicted() {
        let mut history = StateHistory::with_capacity(2);
        history.record(transition(None, TestState::Idle, 0));
        history.record(transition(Some(TestState::Idle), TestState::Walk, 1));
        history.record(transition(Some(TestState::Walk), TestState::Run, 2));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![TestState::Idle, TestState::Walk, TestState::Run]
        );
        assert_eq!(history.last().unwrap().to, TestState::Run);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut history = StateHistory::with_capacity(0);
        history.record(transition(None, TestState::Idle, 0));
        assert!(history.is_empty());
    }

    #[test]
    fn during_tick_filters_cascade() {
        let mut history = StateHistory::with_capacity(8);
        history.record(transition(None, TestState::Idle, 0));
        history.record(transition(Some(TestState::Idle), TestState::Run, 5));
        history.record(transition(Some(TestState::Run), TestState::Walk, 5));

        let cascade: Vec<_> = history.during_tick(5).map(|t| t.to).collect();
        assert_eq!(cascade, vec![TestState::Run, TestState::Walk]);
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_capacity(4);
        history.record(transition(None, TestState::Idle, 0));
        history.record(transition(Some(TestState::Idle), TestState::Run, 1));

        let json = history.to_json().unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(history.len(), deserialized.len());
        assert_eq!(history.get_path(), deserialized.get_path());
    }
}
