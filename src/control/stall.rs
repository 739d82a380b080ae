//! Detects a scalar signal that has stopped changing.

use crate::core::validate::{self, check, require};
use crate::core::{Clock, ConfigError, Stopwatch, Violation};
use std::time::Duration;

/// Detects lack of change in an observed value over a time window.
///
/// Feed [`observe`](Self::observe) the reading from a motor encoder or other
/// sensor once per loop. While successive readings differ by less than the
/// tolerance a timer runs; once it has run for longer than the window the
/// signal is reported as stalled, and keeps being reported on every call
/// until a reading moves by at least the tolerance.
///
/// # Example
///
/// ```rust
/// use statecraft::control::StallDetector;
/// use statecraft::testing::FakeClock;
/// use std::time::Duration;
///
/// let clock = FakeClock::new();
/// let mut detector = StallDetector::builder()
///     .clock(clock.clone())
///     .tolerance(5.0)
///     .window(Duration::from_millis(200))
///     .build()
///     .unwrap();
///
/// assert!(!detector.observe(10.0));
/// assert!(!detector.observe(12.0));
/// clock.advance(Duration::from_millis(250));
/// assert!(detector.observe(12.0));
/// assert!(!detector.observe(30.0));
/// ```
pub struct StallDetector {
    tolerance: f64,
    window: Duration,
    timer: Stopwatch,
    last_observed: Option<f64>,
}

impl StallDetector {
    pub fn builder() -> StallDetectorBuilder {
        StallDetectorBuilder::new()
    }

    /// Feed one reading. Returns true while stalled.
    pub fn observe(&mut self, value: f64) -> bool {
        let Some(previous) = self.last_observed.replace(value) else {
            return false;
        };

        if (value - previous).abs() < self.tolerance {
            self.timer.start();
        } else {
            self.timer.reset();
        }

        self.timer.is_running() && self.timer.elapsed() > self.window
    }

    /// Forget the baseline and stop the timer.
    pub fn reset(&mut self) {
        self.last_observed = None;
        self.timer.reset();
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

/// Builder for [`StallDetector`]. All fields are validated together.
#[derive(Default)]
pub struct StallDetectorBuilder {
    clock: Option<Box<dyn Clock>>,
    tolerance: Option<f64>,
    window: Option<Duration>,
}

impl StallDetectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time source for the stall window (required).
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Smallest change that counts as movement (required, at least zero).
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// How long the signal may sit still before it is stalled (required, non-zero).
    pub fn window(mut self, window: Duration) -> Self {
        self.window = Some(window);
        self
    }

    pub fn build(self) -> Result<StallDetector, ConfigError> {
        let mut checks = vec![
            require(&self.clock, "clock"),
            require(&self.tolerance, "tolerance"),
            require(&self.window, "window"),
        ];
        if let Some(tolerance) = self.tolerance {
            checks.push(check(tolerance.is_finite() && tolerance >= 0.0, || {
                Violation::OutOfRange {
                    field: "tolerance",
                    expected: "a finite value of at least zero",
                    actual: tolerance.to_string(),
                }
            }));
        }
        if let Some(window) = self.window {
            checks.push(check(!window.is_zero(), || Violation::OutOfRange {
                field: "window",
                expected: "greater than zero",
                actual: format!("{window:?}"),
            }));
        }
        validate::all(checks)?;

        match (self.clock, self.tolerance, self.window) {
            (Some(clock), Some(tolerance), Some(window)) => Ok(StallDetector {
                tolerance,
                window,
                timer: Stopwatch::unstarted(clock),
                last_observed: None,
            }),
            _ => Err(ConfigError::Invalid {
                violations: vec![Violation::Missing {
                    field: "stall detector settings",
                }],
            }),
        }
    }
}
