//! The `State` capability every node of a machine implements.
//!
//! A state never holds references to other states. It answers each step
//! with a [`Transition`] describing where it wants to go, and the engine
//! resolves that against the links held by the [`StateGraph`](super::StateGraph).

use super::error::StepError;
use super::io::{RangeInput, Telemetry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one [`StateGraph`](super::StateGraph), stamped into every
/// [`StateId`] it hands out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphId(u64);

impl GraphId {
    /// Draw an identity no other graph in this process has.
    pub(crate) fn next() -> Self {
        // zero is never drawn
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a state registered in a [`StateGraph`](super::StateGraph).
///
/// Only valid for the graph that issued it; other graphs reject it as an
/// unknown state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId {
    graph: GraphId,
    index: usize,
}

impl StateId {
    pub(crate) fn new(graph: GraphId, index: usize) -> Self {
        Self { graph, index }
    }

    /// Handle that belongs to no graph.
    #[cfg(test)]
    pub(crate) fn detached(index: usize) -> Self {
        Self::new(GraphId(0), index)
    }

    /// Position of the state in its graph, in registration order.
    pub fn index(self) -> usize {
        self.index
    }

    /// The graph that issued this handle.
    pub fn graph(self) -> GraphId {
        self.graph
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// What a state asks for at the end of a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Remain in this state.
    Stay,
    /// Follow the `next` link.
    Next,
    /// Follow the `fallback` link, or stay if there is none.
    Fallback,
    /// Jump to an explicit state.
    Goto(StateId),
    /// Stop the machine.
    Halt,
}

/// A [`Transition`] after the engine has resolved it against the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextState {
    Same,
    Other(StateId),
    Halt,
}

/// Read-only view handed to a state while it steps.
///
/// States reach the outside world only through their own inputs and this
/// context; they cannot touch the engine.
pub struct StepContext<'a> {
    id: StateId,
    name: &'a str,
    tick: u64,
    telemetry: Option<&'a dyn Telemetry>,
}

impl<'a> StepContext<'a> {
    pub fn new(
        id: StateId,
        name: &'a str,
        tick: u64,
        telemetry: Option<&'a dyn Telemetry>,
    ) -> Self {
        Self {
            id,
            name,
            tick,
            telemetry,
        }
    }

    /// The state being stepped.
    pub fn state_id(&self) -> StateId {
        self.id
    }

    pub fn state_name(&self) -> &str {
        self.name
    }

    /// Number of ticks the owning machine has processed, including this one.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Best-effort telemetry write. Does nothing without a sink.
    pub fn report(&self, key: &str, value: &str) {
        if let Some(telemetry) = self.telemetry {
            telemetry.report(key, value);
        }
    }
}

/// Trait for state machine states.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{State, StepContext, StepError, Transition};
///
/// struct Blink {
///     lit: bool,
/// }
///
/// impl State for Blink {
///     fn name(&self) -> &str {
///         "blink"
///     }
///
///     fn step(&mut self, _ctx: &mut StepContext<'_>) -> Result<Transition, StepError> {
///         self.lit = !self.lit;
///         Ok(Transition::Next)
///     }
///
///     fn reset(&mut self) {
///         self.lit = false;
///     }
/// }
/// ```
pub trait State {
    /// Name used in logs, telemetry and status snapshots. Must not be empty.
    fn name(&self) -> &str;

    /// Short variant name used alongside [`name`](Self::name) in logs.
    fn kind(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Do this state's work for one tick.
    fn step(&mut self, ctx: &mut StepContext<'_>) -> Result<Transition, StepError>;

    /// Return to the initial internal condition.
    fn reset(&mut self);

    /// Live tuning hook, only called while a debugging machine is paused here.
    fn configure(&mut self, _input: Option<&dyn RangeInput>) {}

    /// Whether an unset `next` link means "stay" rather than "halt".
    fn loops_by_default(&self) -> bool {
        false
    }
}
