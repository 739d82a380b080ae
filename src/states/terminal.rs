//! A sink that parks the machine in a safe condition.

use crate::core::{ActionError, State, StepContext, StepError, Transition};

type TerminalAction = Box<dyn FnMut() -> Result<(), ActionError>>;

/// Runs its terminal action once, then stays put for good.
///
/// Typically the last state of an autonomous routine: stop every motor,
/// park the servos, and hold there until the program ends. `reset()`
/// re-arms the action.
pub struct TerminalState {
    name: String,
    action: TerminalAction,
    has_run: bool,
}

impl TerminalState {
    pub fn new<F>(name: impl Into<String>, mut action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self::fallible(name, move || {
            action();
            Ok(())
        })
    }

    pub fn fallible<F>(name: impl Into<String>, action: F) -> Self
    where
        F: FnMut() -> Result<(), ActionError> + 'static,
    {
        Self {
            name: name.into(),
            action: Box::new(action),
            has_run: false,
        }
    }

    /// Whether the terminal action has already run since the last reset.
    pub fn has_run(&self) -> bool {
        self.has_run
    }
}

impl State for TerminalState {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, _ctx: &mut StepContext<'_>) -> Result<Transition, StepError> {
        if !self.has_run {
            // set before running: a failing action is not retried
            self.has_run = true;
            (self.action)().map_err(StepError::Failed)?;
        }

        Ok(Transition::Stay)
    }

    fn reset(&mut self) {
        self.has_run = false;
    }
}
