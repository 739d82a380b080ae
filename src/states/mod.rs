//! Ready-made states for common robot program patterns.

mod delay;
mod repeating;
mod runnable;
mod terminal;
mod timeout;
mod toggle;

pub use delay::{DelayState, DELAY_PROGRESS_KEY};
pub use repeating::RepeatingStep;
pub use runnable::RunnableStep;
pub use terminal::TerminalState;
pub use timeout::TimeoutGuardedButtonState;
pub use toggle::{ToggleFns, ToggleHandler, ToggleState};
