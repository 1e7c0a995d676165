//! Concrete entities driven by [`StateMachine`](crate::machine::StateMachine).
//!
//! Each actor declares its own state set and implements
//! [`StateOwner`](crate::machine::StateOwner). The host writes sensed world
//! state in before a tick and reads velocity, facing and animation intents out
//! after it.

pub mod boar;
pub mod body;
pub mod player;

pub use boar::{Boar, BoarSenses, BoarState};
pub use body::{Body, Facing};
pub use player::{Player, PlayerSenses, PlayerState};
