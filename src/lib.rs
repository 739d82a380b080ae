//! Statecraft: a tick-driven state machine engine for robot programs
//!
//! A robot control loop calls [`StateMachine::tick`] once per cycle. Each
//! tick runs one step of the current state, and the state answers with a
//! [`Transition`] saying whether to stay, move on, fall back or halt.
//! Nothing blocks: waiting is a state that keeps answering "stay".
//!
//! # Core Concepts
//!
//! - **State**: a named unit of work implementing the [`State`] trait
//! - **Graph**: the arena owning states and their `next`/`fallback` links
//! - **Engine**: the [`StateMachine`] that ticks the graph and keeps history
//! - **Debugging**: pause on every transition, then go, go back or do over
//!
//! # Example
//!
//! ```rust
//! use statecraft::machine::StateMachine;
//! use statecraft::states::{RunnableStep, TerminalState};
//! use statecraft::testing::FakeClock;
//! use std::time::Duration;
//!
//! let clock = FakeClock::new();
//! let mut machine = StateMachine::new("autonomous");
//!
//! let sequence = {
//!     let mut seq = machine.sequence().unwrap();
//!     seq.run("raise arm", || {}).unwrap();
//!     seq.wait("let arm settle", Duration::from_millis(300), clock.clone()).unwrap();
//!     seq.run("release", || {}).unwrap();
//!     seq.finish().unwrap()
//! };
//! machine.add_sequence(sequence).unwrap();
//! machine.add_sequential(TerminalState::new("park", || {})).unwrap();
//!
//! machine.tick().unwrap();
//! machine.tick().unwrap();
//! assert_eq!(machine.current_state_name(), Some("let arm settle"));
//!
//! clock.advance(Duration::from_millis(301));
//! machine.tick().unwrap();
//! machine.tick().unwrap();
//! assert_eq!(machine.current_state_name(), Some("park"));
//! ```

pub mod builder;
pub mod control;
pub mod core;
pub mod machine;
pub mod states;
pub mod testing;

// Re-export commonly used types
pub use builder::{Sequence, SequenceBuilder};
pub use control::{DebouncedInput, StallDetector};
pub use crate::core::{ConfigError, State, StateId, StepContext, StepError, Transition};
pub use machine::{MachineConfig, MachineError, StateMachine};
