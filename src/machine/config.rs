//! Declarative machine settings.

use crate::core::validate::{self, check};
use crate::core::{ConfigError, Violation, DEFAULT_JOURNAL_CAPACITY, DEFAULT_STACK_CAPACITY};
use serde::{Deserialize, Serialize};

/// Settings a [`StateMachine`](super::StateMachine) can be built from.
///
/// Every field has a default, so a config file only needs to name what it
/// changes.
///
/// # Example
///
/// ```rust
/// use statecraft::machine::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "name": "auto", "debug": true }"#).unwrap();
/// assert_eq!(config.name, "auto");
/// assert!(config.debug);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Machine name, recorded on the tracing span and in status snapshots.
    pub name: String,
    /// Start with the step debugger enabled.
    pub debug: bool,
    /// Entries kept on the rewind stack.
    pub history_capacity: usize,
    /// Transition records kept in the journal. Zero disables the journal.
    pub journal_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: "state machine".to_string(),
            debug: false,
            history_capacity: DEFAULT_STACK_CAPACITY,
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }
}

impl MachineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field, reporting all problems together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::all(vec![
            check(!self.name.trim().is_empty(), || Violation::Missing { field: "name" }),
            check(self.history_capacity > 0, || Violation::OutOfRange {
                field: "history_capacity",
                expected: "greater than zero",
                actual: self.history_capacity.to_string(),
            }),
        ])
    }
}
