//! Press-to-toggle behaviour.

use crate::control::DebouncedInput;
use crate::core::{State, StepContext, StepError, Transition};

/// Receives the on/off callbacks of a [`ToggleState`].
pub trait ToggleHandler {
    /// Called when the toggle goes from off to on.
    fn toggled_on(&mut self);

    /// Called when the toggle goes from on to off.
    fn toggled_off(&mut self);
}

/// [`ToggleHandler`] made from two closures.
pub struct ToggleFns<On, Off> {
    on: On,
    off: Off,
}

impl<On, Off> ToggleHandler for ToggleFns<On, Off>
where
    On: FnMut(),
    Off: FnMut(),
{
    fn toggled_on(&mut self) {
        (self.on)()
    }

    fn toggled_off(&mut self) {
        (self.off)()
    }
}

/// Performs an action when a button press toggles something on or off.
///
/// Never blocks: after handling a possible press it always moves to its
/// next state. With no next state linked it loops on itself, so it can sit
/// in a sequence as a standing background toggle.
pub struct ToggleState {
    name: String,
    button: DebouncedInput,
    handler: Box<dyn ToggleHandler>,
    toggled: bool,
}

impl ToggleState {
    pub fn new<On, Off>(name: impl Into<String>, button: DebouncedInput, on: On, off: Off) -> Self
    where
        On: FnMut() + 'static,
        Off: FnMut() + 'static,
    {
        Self::with_handler(name, button, ToggleFns { on, off })
    }

    pub fn with_handler(
        name: impl Into<String>,
        button: DebouncedInput,
        handler: impl ToggleHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            button,
            handler: Box::new(handler),
            toggled: false,
        }
    }

    pub fn is_on(&self) -> bool {
        self.toggled
    }
}

impl State for ToggleState {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, _ctx: &mut StepContext<'_>) -> Result<Transition, StepError> {
        if self.button.rose() {
            self.toggled = !self.toggled;

            if self.toggled {
                self.handler.toggled_on();
            } else {
                self.handler.toggled_off();
            }
        }

        Ok(Transition::Next)
    }

    fn reset(&mut self) {
        self.toggled = false;
    }

    fn loops_by_default(&self) -> bool {
        true
    }
}
