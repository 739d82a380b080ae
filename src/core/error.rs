//! Configuration and step errors shared by every layer of the engine.

use super::state::StateId;
use std::fmt;
use thiserror::Error;

/// Boxed error produced by user-supplied actions.
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A single field-level validation failure.
///
/// Builders and configs collect every violation in one pass so the author
/// sees all problems at once.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be {expected} (got {actual})")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        actual: String,
    },
}

/// Which outgoing link of a state is being set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSlot {
    Next,
    Fallback,
}

impl fmt::Display for LinkSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => f.write_str("next"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Faults in how a machine was put together. Always fatal.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("State machine already has the first state set")]
    FirstStateAlreadySet,

    #[error("Cannot {operation} once the state machine is running")]
    AlreadyRunning { operation: &'static str },

    #[error("No first state set. Call set_first_state() or add_sequential() before tick()")]
    NoFirstState,

    #[error("State names must not be empty")]
    EmptyName,

    #[error("State '{state}' already has its {slot} link set")]
    LinkAlreadySet { state: String, slot: LinkSlot },

    #[error("Unknown state {0}")]
    UnknownState(StateId),

    #[error("Sequence has no states")]
    EmptySequence,

    #[error("Debug mode requires controls that are not set: {}", missing.join(", "))]
    MissingDebugControls { missing: Vec<&'static str> },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {}", join_violations(violations))]
    Invalid { violations: Vec<Violation> },
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error returned from [`State::step`](super::State::step).
#[derive(Debug, Error)]
pub enum StepError {
    /// Propagated out of `tick()` unchanged.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Wrapped with the failing state's context at the engine boundary.
    #[error("{0}")]
    Failed(ActionError),
}

impl StepError {
    /// Wrap any error raised by state logic.
    pub fn failed<E>(error: E) -> Self
    where
        E: Into<ActionError>,
    {
        Self::Failed(error.into())
    }
}
