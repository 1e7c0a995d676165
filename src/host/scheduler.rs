//! Fixed-timestep host loop.

use crate::builder::config::into_errors;
use crate::builder::{BuildError, SchedulerConfig};
use crate::host::actor::{Actor, Tickable};
use crate::machine::{MachineError, StateOwner};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Handle to an actor registered with a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Result of one fixed tick across every actor.
#[derive(Debug, Default)]
pub struct StepReport {
    /// Scheduler tick that just ran
    pub tick: u64,
    /// Actors whose tick failed; the others still ran
    pub failures: Vec<(ActorId, MachineError)>,
}

/// Runs every registered actor once per fixed tick, in spawn order.
///
/// Wall-clock frame time is accumulated and converted into whole fixed ticks.
/// A frame that would need more than `max_steps_per_frame` ticks runs that
/// many and drops the rest of the backlog.
///
/// # Example
///
/// ```rust
/// use tickstate::actors::Boar;
/// use tickstate::builder::SchedulerConfig;
/// use tickstate::host::{Actor, Scheduler};
///
/// let mut scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
/// let boar = Actor::with_label(Boar::new(), "boar").unwrap();
/// let id = scheduler.spawn(boar).unwrap();
///
/// let ticks = scheduler.frame(1.0 / 30.0);
/// assert_eq!(ticks, 2);
/// assert!(scheduler.actor::<Boar>(id).is_some());
/// ```
pub struct Scheduler {
    config: SchedulerConfig,
    actors: Vec<(ActorId, Box<dyn Tickable>)>,
    backlog: f64,
    tick: u64,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self, BuildError> {
        let errors = into_errors(config.validate());
        if !errors.is_empty() {
            return Err(BuildError::InvalidConfig(errors));
        }

        Ok(Self {
            config,
            actors: Vec::new(),
            backlog: 0.0,
            tick: 0,
        })
    }

    /// Register and activate an actor.
    pub fn spawn<O>(&mut self, actor: Actor<O>) -> Result<ActorId, MachineError>
    where
        O: StateOwner + 'static,
    {
        self.spawn_boxed(Box::new(actor))
    }

    pub fn spawn_boxed(&mut self, mut actor: Box<dyn Tickable>) -> Result<ActorId, MachineError> {
        actor.activate()?;
        let id = ActorId::new();
        debug!(actor = %id, label = actor.label(), "actor spawned");
        self.actors.push((id, actor));
        Ok(id)
    }

    /// Remove an actor, returning it if it was registered.
    pub fn despawn(&mut self, id: ActorId) -> Option<Box<dyn Tickable>> {
        let index = self.actors.iter().position(|(actor_id, _)| *actor_id == id)?;
        let (_, actor) = self.actors.remove(index);
        debug!(actor = %id, label = actor.label(), "actor despawned");
        Some(actor)
    }

    pub fn actor<O: StateOwner + 'static>(&self, id: ActorId) -> Option<&Actor<O>> {
        self.actors
            .iter()
            .find(|(actor_id, _)| *actor_id == id)
            .and_then(|(_, actor)| actor.as_any().downcast_ref())
    }

    pub fn actor_mut<O: StateOwner + 'static>(&mut self, id: ActorId) -> Option<&mut Actor<O>> {
        self.actors
            .iter_mut()
            .find(|(actor_id, _)| *actor_id == id)
            .and_then(|(_, actor)| actor.as_any_mut().downcast_mut())
    }

    /// Account for `elapsed` wall-clock seconds and run the ticks it covers.
    ///
    /// Returns the number of ticks run.
    pub fn frame(&mut self, elapsed: f64) -> usize {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.backlog += elapsed;
        }

        let mut steps = 0;
        while self.backlog >= self.config.fixed_delta {
            if steps == self.config.max_steps_per_frame {
                warn!(
                    dropped = self.backlog,
                    max_steps = self.config.max_steps_per_frame,
                    "frame backlog exceeded step budget; dropping"
                );
                self.backlog = 0.0;
                break;
            }
            self.backlog -= self.config.fixed_delta;
            self.step();
            steps += 1;
        }
        steps
    }

    /// Run exactly one fixed tick for every actor.
    ///
    /// A failing actor is logged and reported but does not stop the others.
    pub fn step(&mut self) -> StepReport {
        let delta = self.config.fixed_delta;
        let mut report = StepReport {
            tick: self.tick,
            failures: Vec::new(),
        };

        for (id, actor) in &mut self.actors {
            if let Err(err) = actor.tick(delta) {
                error!(actor = %id, label = actor.label(), error = %err, "actor tick failed");
                report.failures.push((*id, err));
            }
        }

        self.tick += 1;
        report
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn fixed_delta(&self) -> f64 {
        self.config.fixed_delta
    }
}
