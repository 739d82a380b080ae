//! Debugging Session
//!
//! This example steps through a routine with the debugger switched on,
//! pressing the operator buttons from a script instead of a gamepad.
//!
//! Key concepts:
//! - Pausing before every state while debugging
//! - Tuning a state live through its `configure` hook
//! - Go, go-back and do-over controls
//! - Status snapshots as JSON
//!
//! Run with: cargo run --example debug_session

use statecraft::control::DebouncedInput;
use statecraft::core::{RangeInput, State, StepContext, StepError, Transition};
use statecraft::machine::{MachineError, StateMachine};
use statecraft::states::{RunnableStep, TerminalState};
use statecraft::testing::{FakeDigitalInput, FakeRangeInput};

/// Turns to a heading that can be tuned while the machine is paused on it.
struct Turn {
    heading: f32,
}

impl State for Turn {
    fn name(&self) -> &str {
        "turn"
    }

    fn step(&mut self, _ctx: &mut StepContext<'_>) -> Result<Transition, StepError> {
        println!("  turning to {:.0} degrees", self.heading);
        Ok(Transition::Next)
    }

    fn reset(&mut self) {}

    fn configure(&mut self, input: Option<&dyn RangeInput>) {
        if let Some(input) = input {
            self.heading = input.value() * 180.0;
        }
    }
}

fn press(
    machine: &mut StateMachine,
    button: &FakeDigitalInput,
    label: &str,
) -> Result<(), MachineError> {
    println!("> press {label}");
    button.press();
    machine.tick()?;
    button.release();
    println!("  {}", machine.status().line());
    Ok(())
}

fn main() -> Result<(), MachineError> {
    println!("=== Debugging Session Example ===\n");

    let (go, go_back, do_over) = (
        FakeDigitalInput::new(false),
        FakeDigitalInput::new(false),
        FakeDigitalInput::new(false),
    );
    let stick = FakeRangeInput::new(0.0);

    let mut machine = StateMachine::new("debug session");
    machine.set_go_button(DebouncedInput::new(go.clone()));
    machine.set_go_back_button(DebouncedInput::new(go_back.clone()));
    machine.set_do_over_button(DebouncedInput::new(do_over.clone()));
    machine.set_configure_input(stick.clone());

    machine.add_sequential(RunnableStep::new("drive", || println!("  driving forward")))?;
    machine.add_sequential(Turn { heading: 90.0 })?;
    machine.add_sequential(TerminalState::new("stop", || println!("  stopped")))?;
    machine.start_debugging();

    machine.tick()?;
    println!("{}", machine.status().line());

    // tune the turn while paused on it
    stick.set(0.25);
    machine.tick()?;

    press(&mut machine, &go, "go")?;
    machine.tick()?;
    println!("{}", machine.status().line());

    press(&mut machine, &go_back, "go-back")?;
    press(&mut machine, &do_over, "do-over")?;

    match machine.status().to_json() {
        Ok(json) => println!("\nSnapshot: {json}"),
        Err(e) => println!("\nSnapshot failed: {e}"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
