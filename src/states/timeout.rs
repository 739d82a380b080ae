//! Waits for a button press, with a safety timeout.

use crate::control::DebouncedInput;
use crate::core::{Clock, State, StepContext, StepError, Stopwatch, Transition};
use std::time::Duration;

/// Waits for a button rise, giving up after a safety timeout.
///
/// The timeout starts on the first visit. Once it has elapsed the state
/// resets itself and takes its `fallback` link, or stays and starts a
/// fresh timeout if no fallback is linked. A rise before that moves to the
/// `next` link.
pub struct TimeoutGuardedButtonState {
    name: String,
    button: DebouncedInput,
    timeout: Duration,
    stopwatch: Stopwatch,
}

impl TimeoutGuardedButtonState {
    pub fn new(
        name: impl Into<String>,
        button: DebouncedInput,
        clock: impl Clock + 'static,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            button,
            timeout,
            stopwatch: Stopwatch::unstarted(clock),
        }
    }

    fn is_timed_out(&mut self) -> bool {
        self.stopwatch.start();
        self.stopwatch.elapsed() > self.timeout
    }
}

impl State for TimeoutGuardedButtonState {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, _ctx: &mut StepContext<'_>) -> Result<Transition, StepError> {
        if self.is_timed_out() {
            self.reset();
            return Ok(Transition::Fallback);
        }

        if self.button.rose() {
            self.reset();
            return Ok(Transition::Next);
        }

        Ok(Transition::Stay)
    }

    fn reset(&mut self) {
        self.stopwatch.reset();
    }
}
