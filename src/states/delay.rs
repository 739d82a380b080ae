//! Waits for a fixed time before moving on.

use crate::core::{Clock, State, StepContext, StepError, Stopwatch, Transition};
use std::time::Duration;

/// Telemetry key for delay progress.
pub const DELAY_PROGRESS_KEY: &str = "delay";

/// Delay state timed by an injected clock, so tests can advance time.
///
/// The first visit starts the stopwatch. The state is left on the first
/// visit where the elapsed time is strictly greater than the threshold:
/// a 100 ms delay that has run exactly 100 ms still waits. The stopwatch is
/// reset on the way out, so the same state can be reused inside a cycle.
pub struct DelayState {
    name: String,
    threshold: Duration,
    stopwatch: Stopwatch,
}

impl DelayState {
    pub fn new(name: impl Into<String>, clock: impl Clock + 'static, threshold: Duration) -> Self {
        Self {
            name: name.into(),
            threshold,
            stopwatch: Stopwatch::unstarted(clock),
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }
}

impl State for DelayState {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> Result<Transition, StepError> {
        if !self.stopwatch.is_running() {
            self.stopwatch.start();
            return Ok(Transition::Stay);
        }

        let elapsed = self.stopwatch.elapsed();
        if elapsed > self.threshold {
            self.stopwatch.reset();
            return Ok(Transition::Next);
        }

        ctx.report(
            DELAY_PROGRESS_KEY,
            &format!(
                "{} {} of {} ms",
                self.name,
                elapsed.as_millis(),
                self.threshold.as_millis()
            ),
        );
        Ok(Transition::Stay)
    }

    fn reset(&mut self) {
        self.stopwatch.reset();
    }
}
