//! "Run until" loops without a bespoke state type.

use crate::core::{State, StepContext, StepError, Transition};

type Predicate = Box<dyn FnMut(&StepContext<'_>) -> bool>;

/// Calls its predicate every tick, staying while it returns true.
///
/// # Example
///
/// ```rust
/// use statecraft::states::RepeatingStep;
///
/// let mut remaining = 3;
/// let countdown = RepeatingStep::new("count down", move |_ctx| {
///     remaining -= 1;
///     remaining > 0
/// });
/// ```
pub struct RepeatingStep {
    name: String,
    predicate: Predicate,
}

impl RepeatingStep {
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: FnMut(&StepContext<'_>) -> bool + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl State for RepeatingStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> Result<Transition, StepError> {
        if (self.predicate)(ctx) {
            Ok(Transition::Stay)
        } else {
            Ok(Transition::Next)
        }
    }

    fn reset(&mut self) {}
}
