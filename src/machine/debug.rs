//! Operator controls for the step debugger.

use crate::control::DebouncedInput;
use crate::core::ConfigError;

/// Operator request read from the debug controls while paused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugCommand {
    /// Resume running from the current state.
    Go,
    /// Rewind to the previously executed state.
    GoBack,
    /// Reset everything and return to the first state.
    DoOver,
}

/// The go / go-back / do-over buttons.
#[derive(Debug, Default)]
pub struct DebugControls {
    go: Option<DebouncedInput>,
    go_back: Option<DebouncedInput>,
    do_over: Option<DebouncedInput>,
}

impl DebugControls {
    pub fn set_go(&mut self, button: DebouncedInput) {
        self.go = Some(button);
    }

    pub fn set_go_back(&mut self, button: DebouncedInput) {
        self.go_back = Some(button);
    }

    pub fn set_do_over(&mut self, button: DebouncedInput) {
        self.do_over = Some(button);
    }

    /// Fails naming every control that is not set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing: Vec<&'static str> = [
            ("go", self.go.is_some()),
            ("go-back", self.go_back.is_some()),
            ("do-over", self.do_over.is_some()),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(control, _)| control)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingDebugControls { missing })
        }
    }

    /// First control that rose, checked in the order go, go-back, do-over.
    ///
    /// Controls after the one that fired are not read on this poll.
    pub fn poll(&mut self) -> Option<DebugCommand> {
        if Self::rose(&mut self.go) {
            Some(DebugCommand::Go)
        } else if Self::rose(&mut self.go_back) {
            Some(DebugCommand::GoBack)
        } else if Self::rose(&mut self.do_over) {
            Some(DebugCommand::DoOver)
        } else {
            None
        }
    }

    fn rose(button: &mut Option<DebouncedInput>) -> bool {
        button.as_mut().is_some_and(DebouncedInput::rose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDigitalInput;

    fn controls() -> (DebugControls, [FakeDigitalInput; 3]) {
        let buttons = [
            FakeDigitalInput::new(false),
            FakeDigitalInput::new(false),
            FakeDigitalInput::new(false),
        ];
        let mut controls = DebugControls::default();
        controls.set_go(DebouncedInput::new(buttons[0].clone()));
        controls.set_go_back(DebouncedInput::new(buttons[1].clone()));
        controls.set_do_over(DebouncedInput::new(buttons[2].clone()));
        (controls, buttons)
    }

    #[test]
    fn validate_lists_missing_controls() {
        let mut controls = DebugControls::default();
        controls.set_go_back(DebouncedInput::new(FakeDigitalInput::new(false)));

        assert_eq!(
            controls.validate(),
            Err(ConfigError::MissingDebugControls {
                missing: vec!["go", "do-over"],
            })
        );
    }

    #[test]
    fn poll_reports_each_press_once() {
        let (mut controls, [go, go_back, do_over]) = controls();
        assert!(controls.validate().is_ok());
        assert_eq!(controls.poll(), None);

        go_back.press();
        assert_eq!(controls.poll(), Some(DebugCommand::GoBack));
        assert_eq!(controls.poll(), None);

        do_over.press();
        assert_eq!(controls.poll(), Some(DebugCommand::DoOver));

        go.press();
        assert_eq!(controls.poll(), Some(DebugCommand::Go));
    }

    #[test]
    fn go_takes_priority() {
        let (mut controls, [go, go_back, _]) = controls();

        go.press();
        go_back.press();

        assert_eq!(controls.poll(), Some(DebugCommand::Go));
        // go-back was not read on that poll, so its rise is still pending
        assert_eq!(controls.poll(), Some(DebugCommand::GoBack));
    }
}
