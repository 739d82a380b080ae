//! The state machine engine and its operator-facing surface.
//!
//! [`StateMachine`] owns a [`StateGraph`](crate::core::StateGraph) and
//! advances it one step per tick. Around it sit the debug controls, the
//! declarative [`MachineConfig`], and the [`MachineStatus`] snapshot.

mod config;
mod debug;
mod engine;
mod error;
mod status;

pub use config::MachineConfig;
pub use debug::{DebugCommand, DebugControls};
pub use engine::{StateMachine, START_DELAY_NAME};
pub use error::MachineError;
pub use status::{status_line, MachineStatus, Phase, STATUS_KEY};
