//! The per-entity driver.

use crate::builder::{BuildError, StateMachineBuilder};
use crate::core::{Decision, ElapsedClock, State, StateHistory, StateTransition};
use crate::machine::context::StateContext;
use crate::machine::error::MachineError;
use crate::machine::owner::StateOwner;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Cascade faults retained per machine.
const MAX_RETAINED_FAULTS: usize = 16;

/// Summary of one [`StateMachine::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome<S: State> {
    /// State the tick settled in
    pub state: S,
    /// Transitions run during the resolution loop
    pub transitions: usize,
    /// The loop hit the cascade limit and was force-stabilized
    pub forced: bool,
}

impl<S: State> TickOutcome<S> {
    pub fn changed(&self) -> bool {
        self.transitions > 0
    }
}

/// A resolution loop that kept requesting transitions past the cascade limit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CascadeFault<S: State> {
    /// Machine tick during which the fault happened
    pub tick: u64,
    /// Cascade limit in force
    pub limit: usize,
    /// States entered during the tick, in order; the last one was kept
    pub path: Vec<S>,
}

/// Drives one owner through its state set, one fixed tick at a time.
///
/// A machine is built with [`StateMachineBuilder`], bound to its owner by
/// passing `&mut owner` into [`activate`](Self::activate) and
/// [`advance`](Self::advance), and never stores the owner itself.
///
/// # Example
///
/// ```rust
/// use tickstate::core::Decision;
/// use tickstate::machine::{StateContext, StateMachine, StateOwner};
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum Gait { Idle, Walk }
/// }
///
/// struct Wanderer;
///
/// impl StateOwner for Wanderer {
///     type State = Gait;
///
///     fn transition_into(&mut self, _: Option<Gait>, _: Gait, _: &StateContext<Gait>) {}
///
///     fn next_state(&self, ctx: &StateContext<Gait>) -> Decision<Gait> {
///         match ctx.current {
///             Gait::Idle => Decision::goto_if(ctx.elapsed_exceeds(2.0), Gait::Walk),
///             Gait::Walk => Decision::Keep,
///         }
///     }
///
///     fn tick_behavior(&mut self, _: &StateContext<Gait>, _: f64) {}
/// }
///
/// let mut owner = Wanderer;
/// let mut machine = StateMachine::<Gait>::builder()
///     .label("wanderer")
///     .build()
///     .unwrap();
///
/// machine.activate(&mut owner).unwrap();
/// for _ in 0..3 {
///     machine.advance(&mut owner, 1.0).unwrap();
/// }
/// assert_eq!(machine.current(), Some(Gait::Idle));
///
/// machine.advance(&mut owner, 1.0).unwrap();
/// assert_eq!(machine.current(), Some(Gait::Walk));
/// ```
#[derive(Clone, Debug)]
pub struct StateMachine<S: State> {
    label: String,
    initial: S,
    current: Option<S>,
    clock: ElapsedClock,
    tick: u64,
    cascade_limit: usize,
    trace_transitions: bool,
    history: StateHistory<S>,
    faults: VecDeque<CascadeFault<S>>,
    fault_count: u64,
}

impl<S: State> StateMachine<S> {
    pub fn builder() -> StateMachineBuilder<S> {
        StateMachineBuilder::new()
    }

    /// Build a machine with default settings, starting in `S::first()`.
    pub fn try_new() -> Result<Self, BuildError> {
        StateMachineBuilder::new().build()
    }

    pub(crate) fn from_parts(
        label: String,
        initial: S,
        cascade_limit: usize,
        history_capacity: usize,
        trace_transitions: bool,
    ) -> Self {
        Self {
            label,
            initial,
            current: None,
            clock: ElapsedClock::new(),
            tick: 0,
            cascade_limit,
            trace_transitions,
            history: StateHistory::with_capacity(history_capacity),
            faults: VecDeque::new(),
            fault_count: 0,
        }
    }

    /// Enter the initial state.
    ///
    /// Call once the owner is fully constructed. The first call runs
    /// `transition_into(None, initial)` and returns `Ok(true)`; later calls do
    /// nothing and return `Ok(false)`.
    pub fn activate<O>(&mut self, owner: &mut O) -> Result<bool, MachineError>
    where
        O: StateOwner<State = S> + ?Sized,
    {
        if self.current.is_some() {
            return Ok(false);
        }

        let ctx = StateContext {
            current: self.initial,
            elapsed: 0.0,
            tick: self.tick,
        };
        self.log_transition(None, self.initial);
        owner.transition_into(None, self.initial, &ctx);
        self.history.record(self.record_for(None, self.initial, 0.0));
        self.current = Some(self.initial);
        self.clock.reset();
        Ok(true)
    }

    /// Run one tick: resolve the state, then run its steady-state behavior.
    ///
    /// The owner is asked for its next state until it answers
    /// [`Decision::Keep`], with every requested transition applied in between.
    /// If the owner keeps requesting transitions after `cascade_limit` of them
    /// in one tick, the next request is applied and the tick proceeds as if it
    /// were stable; the fault is logged and kept in [`faults`](Self::faults).
    ///
    /// A request for an undeclared state fails with
    /// [`MachineError::UnknownState`]. The machine then keeps the state, clock
    /// and history it had before the call, and the tick does not count.
    pub fn advance<O>(&mut self, owner: &mut O, delta: f64) -> Result<TickOutcome<S>, MachineError>
    where
        O: StateOwner<State = S> + ?Sized,
    {
        if !(delta.is_finite() && delta > 0.0) {
            return Err(MachineError::InvalidDelta { delta });
        }
        let mut current = self.state()?;
        let mut elapsed = self.clock.seconds();

        // Applied to the machine only once the loop has settled.
        let mut pending: Vec<StateTransition<S>> = Vec::new();
        let mut forced = false;

        loop {
            let ctx = StateContext {
                current,
                elapsed,
                tick: self.tick,
            };
            let next = match owner.next_state(&ctx) {
                Decision::Keep => break,
                Decision::Goto(next) => next,
            };

            if !next.is_declared() {
                warn!(
                    machine = %self.label,
                    tick = self.tick,
                    state = ?next,
                    discarded = pending.len(),
                    "transition to undeclared state"
                );
                return Err(MachineError::UnknownState {
                    label: self.label.clone(),
                    state: format!("{next:?}"),
                });
            }

            self.log_transition(Some(current), next);
            owner.transition_into(Some(current), next, &ctx);
            pending.push(self.record_for(Some(current), next, elapsed));
            current = next;
            elapsed = 0.0;

            if pending.len() > self.cascade_limit {
                forced = true;
                break;
            }
        }

        let transitions = pending.len();
        if forced {
            self.report_cascade(pending.iter().map(|t| t.to).collect());
        }
        if transitions > 0 {
            for transition in pending {
                self.history.record(transition);
            }
            self.current = Some(current);
            self.clock.reset();
        }

        let ctx = self.context_for(current);
        owner.tick_behavior(&ctx, delta);
        self.clock.accumulate(delta);
        self.tick += 1;

        Ok(TickOutcome {
            state: current,
            transitions,
            forced,
        })
    }

    fn log_transition(&self, from: Option<S>, to: S) {
        let from_name = from.map_or("<none>", |s| s.name());
        if self.trace_transitions {
            debug!(machine = %self.label, tick = self.tick, from = from_name, to = to.name(), "state transition");
        } else {
            trace!(machine = %self.label, tick = self.tick, from = from_name, to = to.name(), "state transition");
        }
    }

    fn record_for(&self, from: Option<S>, to: S, elapsed_in_from: f64) -> StateTransition<S> {
        StateTransition {
            from,
            to,
            tick: self.tick,
            elapsed_in_from,
            recorded_at: Utc::now(),
        }
    }

    fn report_cascade(&mut self, path: Vec<S>) {
        let names: Vec<&'static str> = path.iter().map(|s| s.name()).collect();
        warn!(
            machine = %self.label,
            tick = self.tick,
            limit = self.cascade_limit,
            path = ?names,
            "state cascade did not stabilize; holding last requested state"
        );

        if self.faults.len() == MAX_RETAINED_FAULTS {
            self.faults.pop_front();
        }
        self.faults.push_back(CascadeFault {
            tick: self.tick,
            limit: self.cascade_limit,
            path,
        });
        self.fault_count += 1;
    }

    fn context_for(&self, current: S) -> StateContext<S> {
        StateContext {
            current,
            elapsed: self.clock.seconds(),
            tick: self.tick,
        }
    }

    /// Current state, or `None` before activation.
    pub fn current(&self) -> Option<S> {
        self.current
    }

    /// Current state, failing before activation.
    pub fn state(&self) -> Result<S, MachineError> {
        self.current.ok_or_else(|| MachineError::NotActivated {
            label: self.label.clone(),
        })
    }

    /// Simulated seconds since the last transition.
    pub fn elapsed(&self) -> f64 {
        self.clock.seconds()
    }

    /// Snapshot of what owner callbacks see, once active.
    pub fn context(&self) -> Option<StateContext<S>> {
        self.current.map(|current| self.context_for(current))
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn initial(&self) -> S {
        self.initial
    }

    pub fn cascade_limit(&self) -> usize {
        self.cascade_limit
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Most recent cascade faults, oldest first.
    pub fn faults(&self) -> impl Iterator<Item = &CascadeFault<S>> + '_ {
        self.faults.iter()
    }

    /// Cascade faults since the machine was built, including evicted ones.
    pub fn fault_count(&self) -> u64 {
        self.fault_count
    }
}
