//! Test doubles for the capabilities the engine consumes.
//!
//! Every double is cheap to clone and clones share state, so a test keeps
//! one handle while the machine owns another.

use crate::core::{Clock, DigitalInput, RangeInput, Telemetry};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Clock that only moves when told to.
#[derive(Clone, Debug)]
pub struct FakeClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Total time advanced since creation.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

/// Button whose state the test sets directly.
#[derive(Clone, Debug, Default)]
pub struct FakeDigitalInput {
    active: Rc<Cell<bool>>,
}

impl FakeDigitalInput {
    pub fn new(active: bool) -> Self {
        Self {
            active: Rc::new(Cell::new(active)),
        }
    }

    pub fn set(&self, active: bool) {
        self.active.set(active);
    }

    pub fn press(&self) {
        self.set(true);
    }

    pub fn release(&self) {
        self.set(false);
    }
}

impl DigitalInput for FakeDigitalInput {
    fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Scalar input whose value the test sets directly.
#[derive(Clone, Debug, Default)]
pub struct FakeRangeInput {
    value: Rc<Cell<f32>>,
}

impl FakeRangeInput {
    pub fn new(value: f32) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
        }
    }

    pub fn set(&self, value: f32) {
        self.value.set(value);
    }
}

impl RangeInput for FakeRangeInput {
    fn value(&self) -> f32 {
        self.value.get()
    }
}

/// Telemetry sink that keeps the last value per key.
#[derive(Clone, Debug, Default)]
pub struct RecordingTelemetry {
    items: Rc<RefCell<BTreeMap<String, String>>>,
    writes: Rc<Cell<usize>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Number of `report` calls seen.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }
}

impl Telemetry for RecordingTelemetry {
    fn report(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        self.writes.set(self.writes.get() + 1);
    }
}
