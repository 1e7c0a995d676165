//! Tickstate: a fixed-tick state machine driver for simulation entities
//!
//! Each entity owns a small, closed set of behavior states. Once per
//! simulation tick its [`StateMachine`] asks the entity which state it should
//! be in, applies every requested transition until the entity reports
//! stability, and then hands control back for the settled state's per-tick
//! behavior.
//!
//! # Core Concepts
//!
//! - **State**: a closed enumeration implementing [`State`], usually declared
//!   with [`state_enum!`]
//! - **Owner**: the entity implementing [`StateOwner`]: decisions, transition
//!   effects and steady-state behavior
//! - **Resolution loop**: several transitions may cascade within one tick,
//!   bounded by a cascade limit
//! - **Elapsed-in-state**: simulated time since the last transition, visible
//!   to owner decisions
//!
//! # Example
//!
//! ```rust
//! use tickstate::core::Decision;
//! use tickstate::machine::{StateContext, StateMachine, StateOwner};
//! use tickstate::state_enum;
//!
//! state_enum! {
//!     pub enum Guard {
//!         Patrol,
//!         Chase,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Sentry {
//!     intruder: bool,
//! }
//!
//! impl StateOwner for Sentry {
//!     type State = Guard;
//!
//!     fn transition_into(&mut self, _from: Option<Guard>, _to: Guard, _ctx: &StateContext<Guard>) {}
//!
//!     fn next_state(&self, ctx: &StateContext<Guard>) -> Decision<Guard> {
//!         match ctx.current {
//!             Guard::Patrol => Decision::goto_if(self.intruder, Guard::Chase),
//!             Guard::Chase => Decision::goto_if(!self.intruder, Guard::Patrol),
//!         }
//!     }
//!
//!     fn tick_behavior(&mut self, _ctx: &StateContext<Guard>, _delta: f64) {}
//! }
//!
//! let mut sentry = Sentry::default();
//! let mut machine = StateMachine::<Guard>::try_new().unwrap();
//! machine.activate(&mut sentry).unwrap();
//!
//! sentry.intruder = true;
//! let outcome = machine.advance(&mut sentry, 1.0 / 60.0).unwrap();
//! assert_eq!(outcome.state, Guard::Chase);
//! ```

pub mod actors;
pub mod builder;
pub mod core;
pub mod host;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{MachineConfig, StateMachineBuilder};
pub use crate::core::{Countdown, Decision, State};
pub use crate::host::{Actor, Scheduler};
pub use crate::machine::{MachineError, StateContext, StateMachine, StateOwner, TickOutcome};
