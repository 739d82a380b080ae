//! Builder that links states into a chain.

use crate::core::{ActionError, Clock, ConfigError, State, StateGraph, StateId, StepContext};
use crate::states::{DelayState, RepeatingStep, RunnableStep};
use std::time::Duration;
use tracing::debug;

/// A finished chain of states: `first` → … → `last`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sequence {
    first: StateId,
    last: StateId,
    len: usize,
}

impl Sequence {
    pub fn first(&self) -> StateId {
        self.first
    }

    pub fn last(&self) -> StateId {
        self.last
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Registers states in order and links each to the one before it.
///
/// Obtained from [`StateMachine::sequence`](crate::machine::StateMachine::sequence)
/// before the machine starts.
///
/// # Example
///
/// ```rust
/// use statecraft::machine::StateMachine;
/// use statecraft::testing::FakeClock;
/// use std::time::Duration;
///
/// let clock = FakeClock::new();
/// let mut machine = StateMachine::new("auto");
///
/// let sequence = {
///     let mut seq = machine.sequence().unwrap();
///     seq.run("lower arm", || {}).unwrap();
///     seq.wait("settle", Duration::from_millis(250), clock.clone()).unwrap();
///     seq.run("open claw", || {}).unwrap();
///     seq.finish().unwrap()
/// };
///
/// machine.add_sequence(sequence).unwrap();
/// assert_eq!(sequence.len(), 3);
/// ```
pub struct SequenceBuilder<'g> {
    graph: &'g mut StateGraph,
    first: Option<StateId>,
    last: Option<StateId>,
    len: usize,
}

impl<'g> SequenceBuilder<'g> {
    pub fn new(graph: &'g mut StateGraph) -> Self {
        Self {
            graph,
            first: None,
            last: None,
            len: 0,
        }
    }

    /// Register `state` and link the current tail to it.
    pub fn append<S: State + 'static>(&mut self, state: S) -> Result<StateId, ConfigError> {
        let id = self.graph.add(state)?;
        debug!(state = %self.graph.describe(id), "append to sequence");

        match self.last {
            Some(last) => self.graph.link(last, id)?,
            None => self.first = Some(id),
        }
        self.last = Some(id);
        self.len += 1;
        Ok(id)
    }

    /// Append a [`RunnableStep`].
    pub fn run<F>(&mut self, name: impl Into<String>, action: F) -> Result<StateId, ConfigError>
    where
        F: FnMut() + 'static,
    {
        self.append(RunnableStep::new(name, action))
    }

    /// Append a [`RunnableStep`] whose action can fail.
    pub fn run_fallible<F>(
        &mut self,
        name: impl Into<String>,
        action: F,
    ) -> Result<StateId, ConfigError>
    where
        F: FnMut() -> Result<(), ActionError> + 'static,
    {
        self.append(RunnableStep::fallible(name, action))
    }

    /// Append a [`RepeatingStep`] that stays while `predicate` is true.
    pub fn repeat<F>(&mut self, name: impl Into<String>, predicate: F) -> Result<StateId, ConfigError>
    where
        F: FnMut(&StepContext<'_>) -> bool + 'static,
    {
        self.append(RepeatingStep::new(name, predicate))
    }

    /// Append a [`DelayState`].
    pub fn wait(
        &mut self,
        name: impl Into<String>,
        duration: Duration,
        clock: impl Clock + 'static,
    ) -> Result<StateId, ConfigError> {
        self.append(DelayState::new(name, clock, duration))
    }

    pub fn first(&self) -> Option<StateId> {
        self.first
    }

    pub fn last(&self) -> Option<StateId> {
        self.last
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn finish(self) -> Result<Sequence, ConfigError> {
        match (self.first, self.last) {
            (Some(first), Some(last)) => Ok(Sequence {
                first,
                last,
                len: self.len,
            }),
            _ => Err(ConfigError::EmptySequence),
        }
    }
}
