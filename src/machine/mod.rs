//! The tick-driven state machine and the contract its owners implement.
//!
//! # Key Concepts
//!
//! - **Owner**: the entity being driven, implementing [`StateOwner`]
//! - **Resolution loop**: each tick the owner is asked for its next state
//!   until it reports stability, so several transitions may happen in one tick
//! - **Cascade limit**: a bound on transitions per tick; a loop that exceeds
//!   it is force-stabilized and reported rather than allowed to spin
//!
//! The machine never stores its owner. Hosts pass `&mut owner` into every call,
//! or bundle both in an [`Actor`](crate::host::Actor).

mod context;
mod error;
#[allow(clippy::module_inception)]
mod machine;
mod owner;

pub use context::StateContext;
pub use error::MachineError;
pub use machine::{CascadeFault, StateMachine, TickOutcome};
pub use owner::StateOwner;
