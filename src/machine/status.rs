//! Point-in-time view of a machine, for telemetry and logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Telemetry key the machine reports its status line under.
pub const STATUS_KEY: &str = "state";

/// Where a machine is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    Running,
    /// Debugging and waiting for an operator control.
    Paused,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not started"),
            Self::Running => f.write_str("running"),
            Self::Paused => f.write_str("paused"),
        }
    }
}

/// One-line status, e.g. `"[DEBUG]|| state lift arm"` or `"> state drive"`.
pub fn status_line(debugging: bool, phase: Phase, current: Option<&str>) -> String {
    let debug = if debugging { "[DEBUG]" } else { "" };
    let marker = if phase == Phase::Paused { "||" } else { ">" };
    match current {
        Some(name) => format!("{debug}{marker} state {name}"),
        None => format!("{debug}{marker} halted"),
    }
}

/// Serializable snapshot of a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineStatus {
    pub machine: String,
    /// Drawn when the machine starts; `None` before the first tick.
    pub run_id: Option<Uuid>,
    pub phase: Phase,
    pub debugging: bool,
    pub ticks: u64,
    pub first_state: Option<String>,
    pub current_state: Option<String>,
    /// Names on the rewind stack, oldest first.
    pub history: Vec<String>,
    /// Transitions currently held in the journal.
    pub journaled_transitions: usize,
    pub captured_at: DateTime<Utc>,
}

impl MachineStatus {
    pub fn line(&self) -> String {
        status_line(self.debugging, self.phase, self.current_state.as_deref())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
