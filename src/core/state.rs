//! Core State trait for driven state enumerations.
//!
//! Every state set driven by a [`StateMachine`](crate::machine::StateMachine)
//! implements this trait. It describes a closed, copyable enumeration whose
//! members have a declared order; the first declared member is the default
//! state a machine activates into.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state enumerations.
///
/// All methods are pure. States are small `Copy` values naming the current
/// behavior mode of an entity.
///
/// # Required Traits
///
/// - `Copy` + `Eq`: states are passed by value and compared on every tick
/// - `Debug`: states show up in diagnostics
/// - `Serialize` + `Deserialize`: states appear in history dumps and config
///
/// Most enumerations should use [`state_enum!`](crate::state_enum) rather than
/// implementing this by hand.
///
/// # Example
///
/// ```rust
/// use tickstate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
/// enum Gait {
///     Idle,
///     Walk,
///     Run,
/// }
///
/// impl State for Gait {
///     const ALL: &'static [Self] = &[Self::Idle, Self::Walk, Self::Run];
///
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Walk => "Walk",
///             Self::Run => "Run",
///         }
///     }
/// }
///
/// assert_eq!(Gait::first(), Some(Gait::Idle));
/// assert_eq!(Gait::Run.ordinal(), 2);
/// ```
pub trait State:
    Copy + Eq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Every member of the state set, in declaration order.
    const ALL: &'static [Self];

    /// Get the state's name for display/logging.
    fn name(&self) -> &'static str;

    /// The first declared member, used as the default initial state.
    ///
    /// Returns `None` only for an empty state set, which a machine refuses to
    /// build with.
    fn first() -> Option<Self> {
        Self::ALL.first().copied()
    }

    /// Position of this state in declaration order.
    ///
    /// Returns `Self::ALL.len()` for a value missing from `ALL`, which only a
    /// hand-written implementation can produce.
    fn ordinal(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Whether this value is a declared member of the state set.
    fn is_declared(&self) -> bool {
        Self::ALL.contains(self)
    }

    /// Iterate the state set in declaration order.
    fn iter() -> std::iter::Copied<std::slice::Iter<'static, Self>> {
        Self::ALL.iter().copied()
    }

    /// Number of members in the state set.
    fn cardinality() -> usize {
        Self::ALL.len()
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
        // Deliberately left out of ALL.
        Orphan,
    }

    impl State for TestState {
        const ALL: &'static [Self] = &[Self::Idle, Self::Run, Self::Walk];

        fn name(&self) -> &'static str {
            match self {
                Self::Idle => "Idle",
                Self::Run => "Run",
                Self::Walk => "Walk",
                Self::Orphan => "Orphan",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
    enum Empty {}

    impl State for Empty {
        const ALL: &'static [Self] = &[];

        fn name(&self) -> &'static str {
            match *self {}
        }
    }

    #[test]
    fn first_is_first_declared_member() {
        assert_eq!(TestState::first(), Some(TestState::Idle));
    }

    #[test]
    fn empty_state_set_has_no_first() {
        assert_eq!(Empty::first(), None);
        assert_eq!(Empty::cardinality(), 0);
    }

    #[test]
    fn ordinal_follows_declaration_order() {
        assert_eq!(TestState::Idle.ordinal(), 0);
        assert_eq!(TestState::Run.ordinal(), 1);
        assert_eq!(TestState::Walk.ordinal(), 2);
        assert_eq!(TestState::Orphan.ordinal(), 3);
    }

    #[test]
    fn undeclared_value_is_detected() {
        assert!(TestState::Walk.is_declared());
        assert!(!TestState::Orphan.is_declared());
    }

    #[test]
    fn iter_visits_members_in_order() {
        let all: Vec<_> = TestState::iter().collect();
        assert_eq!(all, vec![TestState::Idle, TestState::Run, TestState::Walk]);
        assert_eq!(TestState::cardinality(), 3);
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Run;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
