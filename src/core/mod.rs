//! Core state types and time bookkeeping.
//!
//! This module contains the pieces every driven entity shares:
//! - State sets via the `State` trait
//! - Owner decisions via `Decision`
//! - Elapsed-in-state and countdown timers
//! - Bounded transition history for diagnostics
//!
//! Nothing here calls back into an owner; the control loop lives in
//! [`machine`](crate::machine).

mod clock;
mod decision;
mod history;
mod state;

pub use clock::{Countdown, ElapsedClock};
pub use decision::Decision;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_CAPACITY};
pub use state::State;
