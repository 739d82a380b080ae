//! Turns a closure into a state.

use crate::core::{ActionError, State, StepContext, StepError, Transition};

type Action = Box<dyn FnMut() -> Result<(), ActionError>>;

/// Runs its action once per visit, then moves to the next state.
pub struct RunnableStep {
    name: String,
    action: Action,
}

impl RunnableStep {
    pub fn new<F>(name: impl Into<String>, mut action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self::fallible(name, move || {
            action();
            Ok(())
        })
    }

    /// Action errors are returned from the machine's `tick()`.
    pub fn fallible<F>(name: impl Into<String>, action: F) -> Self
    where
        F: FnMut() -> Result<(), ActionError> + 'static,
    {
        Self {
            name: name.into(),
            action: Box::new(action),
        }
    }
}

impl State for RunnableStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, _ctx: &mut StepContext<'_>) -> Result<Transition, StepError> {
        (self.action)().map_err(StepError::Failed)?;
        Ok(Transition::Next)
    }

    fn reset(&mut self) {}
}
