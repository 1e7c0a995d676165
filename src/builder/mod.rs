//! Builder API and configuration for state machines.
//!
//! This module provides the fluent [`StateMachineBuilder`], the serde-backed
//! [`MachineConfig`] and [`SchedulerConfig`], and the [`state_enum!`](crate::state_enum)
//! macro for declaring state sets with minimal boilerplate.

pub mod config;
pub mod error;
pub mod machine;
pub mod macros;

pub use config::{MachineConfig, SchedulerConfig, MAX_CASCADE_LIMIT, MAX_HISTORY_CAPACITY};
pub use error::{BuildError, ConfigError};
pub use machine::StateMachineBuilder;
