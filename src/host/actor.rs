//! An owner bundled with its machine.

use crate::builder::BuildError;
use crate::machine::{MachineError, StateMachine, StateOwner, TickOutcome};
use std::any::Any;

/// Object-safe face of an [`Actor`] so a host can tick mixed entity kinds.
pub trait Tickable: Any {
    fn label(&self) -> &str;

    /// Enter the initial state; `Ok(false)` if already active.
    fn activate(&mut self) -> Result<bool, MachineError>;

    /// Run one fixed tick.
    fn tick(&mut self, delta: f64) -> Result<(), MachineError>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// An owner together with the machine driving it.
///
/// The actor owns both halves and lends the owner to the machine on every
/// call, so the machine never outlives or aliases its owner.
#[derive(Debug)]
pub struct Actor<O: StateOwner> {
    owner: O,
    machine: StateMachine<O::State>,
}

impl<O: StateOwner> Actor<O> {
    pub fn new(owner: O, machine: StateMachine<O::State>) -> Self {
        Self { owner, machine }
    }

    /// Bundle `owner` with a default machine labeled `label`.
    pub fn with_label(owner: O, label: impl Into<String>) -> Result<Self, BuildError> {
        let machine = StateMachine::builder().label(label).build()?;
        Ok(Self::new(owner, machine))
    }

    pub fn activate(&mut self) -> Result<bool, MachineError> {
        self.machine.activate(&mut self.owner)
    }

    pub fn advance(&mut self, delta: f64) -> Result<TickOutcome<O::State>, MachineError> {
        self.machine.advance(&mut self.owner, delta)
    }

    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// Mutable access for feeding sensed state between ticks.
    pub fn owner_mut(&mut self) -> &mut O {
        &mut self.owner
    }

    pub fn machine(&self) -> &StateMachine<O::State> {
        &self.machine
    }

    pub fn state(&self) -> Option<O::State> {
        self.machine.current()
    }

    pub fn into_parts(self) -> (O, StateMachine<O::State>) {
        (self.owner, self.machine)
    }
}

impl<O: StateOwner + 'static> Tickable for Actor<O> {
    fn label(&self) -> &str {
        self.machine.label()
    }

    fn activate(&mut self) -> Result<bool, MachineError> {
        Actor::activate(self)
    }

    fn tick(&mut self, delta: f64) -> Result<(), MachineError> {
        self.advance(delta).map(|_| ())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
