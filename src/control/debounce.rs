//! One-shot edge detection over a digital input.

use crate::core::DigitalInput;

/// Turns a raw boolean reading into one-shot rise and fall signals.
///
/// `rose()` and `fell()` share one remembered value, so every change of
/// the underlying input is reported exactly once, by whichever query sees
/// it first. Changes that happen between two queries and cancel out (a
/// press and release inside one control-loop period) are not seen at all;
/// there is no edge buffering.
///
/// # Example
///
/// ```rust
/// use statecraft::control::DebouncedInput;
/// use statecraft::testing::FakeDigitalInput;
///
/// let button = FakeDigitalInput::new(false);
/// let mut debounced = DebouncedInput::new(button.clone());
///
/// button.set(true);
/// assert!(debounced.rose());
/// assert!(!debounced.rose());
/// ```
pub struct DebouncedInput {
    input: Box<dyn DigitalInput>,
    previous: bool,
}

impl DebouncedInput {
    /// Wrap `input`, taking its current reading as the starting value.
    pub fn new(input: impl DigitalInput + 'static) -> Self {
        let previous = input.is_active();
        Self {
            input: Box::new(input),
            previous,
        }
    }

    /// True once for each false to true change.
    pub fn rose(&mut self) -> bool {
        let current = self.input.is_active();
        let rose = !self.previous && current;
        self.previous = current;
        rose
    }

    /// True once for each true to false change.
    pub fn fell(&mut self) -> bool {
        let current = self.input.is_active();
        let fell = self.previous && !current;
        self.previous = current;
        fell
    }

    /// Raw reading. Does not consume an edge.
    pub fn is_active(&self) -> bool {
        self.input.is_active()
    }
}

impl std::fmt::Debug for DebouncedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedInput")
            .field("previous", &self.previous)
            .finish_non_exhaustive()
    }
}
