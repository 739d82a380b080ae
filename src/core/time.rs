//! Time sources and the stopwatch built on them.
//!
//! All timed behaviour reads time through [`Clock`] so tests can advance a
//! fake clock instead of sleeping.

use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<T: Clock + ?Sized> Clock for Rc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Start/reset timer over a [`Clock`].
pub struct Stopwatch {
    clock: Box<dyn Clock>,
    started_at: Option<Instant>,
}

impl Stopwatch {
    /// Create a stopwatch that is not yet running.
    pub fn unstarted(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            started_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start timing. Has no effect if already running.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.clock.now());
        }
    }

    /// Stop and clear the elapsed time.
    pub fn reset(&mut self) {
        self.started_at = None;
    }

    /// Time since [`start`](Self::start), zero when not running.
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|started| self.clock.now().saturating_duration_since(started))
            .unwrap_or(Duration::ZERO)
    }
}
