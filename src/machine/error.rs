//! Errors surfaced by [`StateMachine::tick`](super::StateMachine::tick).

use crate::core::{ActionError, ConfigError};
use thiserror::Error;

/// Everything that can go wrong in a tick.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("State {kind} - '{state}' failed: {source}")]
    Step {
        state: String,
        kind: &'static str,
        #[source]
        source: ActionError,
    },
}

impl MachineError {
    /// Whether this is a configuration fault rather than a runtime failure.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
