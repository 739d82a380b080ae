//! Autonomous Routine
//!
//! This example drives a short autonomous routine from a fixed-period
//! control loop, the way a robot program would.
//!
//! Key concepts:
//! - Building a routine with `SequenceBuilder`
//! - Holding the routine back with a start delay
//! - Waiting without blocking the loop (`DelayState`, `RepeatingStep`)
//! - Parking in a `TerminalState` at the end
//!
//! Run with: cargo run --example autonomous

use statecraft::core::{StepContext, SystemClock, Telemetry};
use statecraft::machine::{MachineError, StateMachine};
use statecraft::states::TerminalState;
use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

const LOOP_PERIOD: Duration = Duration::from_millis(20);

/// Prints every telemetry line as it is reported.
struct ConsoleTelemetry;

impl Telemetry for ConsoleTelemetry {
    fn report(&self, key: &str, value: &str) {
        println!("  [{key}] {value}");
    }
}

fn main() -> Result<(), MachineError> {
    println!("=== Autonomous Routine Example ===\n");

    let arm_height = Rc::new(Cell::new(0u32));
    let mut machine = StateMachine::new("autonomous");
    machine.set_telemetry(ConsoleTelemetry);

    let routine = {
        let mut seq = machine.sequence()?;
        seq.run("drive to hub", || println!("  driving to the hub"))?;
        seq.wait("settle", Duration::from_millis(100), SystemClock)?;
        seq.repeat("raise arm", {
            let arm_height = arm_height.clone();
            move |_ctx: &StepContext<'_>| {
                arm_height.set(arm_height.get() + 10);
                arm_height.get() < 50
            }
        })?;
        seq.run("drop freight", || println!("  dropping freight"))?;
        seq.finish()?
    };
    machine.add_sequence(routine)?;
    machine.add_sequential(TerminalState::new("park", || println!("  motors off, parked")))?;
    machine.add_start_delay(Duration::from_millis(60), SystemClock)?;

    println!("Routine has {} states\n", machine.graph().len());

    for _ in 0..40 {
        machine.tick()?;
        if machine.current_state_name() == Some("park") {
            machine.tick()?;
            break;
        }
        thread::sleep(LOOP_PERIOD);
    }

    println!("\nFinal arm height: {}", arm_height.get());
    println!("Visited: {:?}", machine.status().history);

    println!("\n=== Example Complete ===");
    Ok(())
}
