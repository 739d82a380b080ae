//! Core state machine types.
//!
//! This module contains the pieces every machine is built from:
//! - The `State` capability and the `Transition` a state answers with
//! - The `StateGraph` arena that owns states and their links
//! - Execution history used for rewinding and diagnostics
//! - Time, input and telemetry capabilities consumed from the host

mod error;
mod graph;
mod history;
mod io;
mod state;
mod time;
pub(crate) mod validate;

pub use error::{ActionError, ConfigError, LinkSlot, StepError, Violation};
pub use graph::StateGraph;
pub use history::{
    ExecutionHistory, TransitionRecord, DEFAULT_JOURNAL_CAPACITY, DEFAULT_STACK_CAPACITY,
};
pub use io::{DigitalInput, RangeInput, Telemetry};
pub use state::{GraphId, NextState, State, StateId, StepContext, Transition};
pub use time::{Clock, Stopwatch, SystemClock};
