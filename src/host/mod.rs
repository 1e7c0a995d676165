//! Host-side glue: bundling owners with machines and ticking them.
//!
//! A host simulation that keeps owners and machines apart can call
//! [`StateMachine::activate`](crate::machine::StateMachine::activate) and
//! [`advance`](crate::machine::StateMachine::advance) directly. The types here
//! cover the common case of a flat set of entities on one fixed timestep.

mod actor;
mod scheduler;

pub use actor::{Actor, Tickable};
pub use scheduler::{ActorId, Scheduler, StepReport};
