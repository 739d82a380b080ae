//! Signal conditioning primitives used by states.

mod debounce;
mod stall;

pub use debounce::DebouncedInput;
pub use stall::{StallDetector, StallDetectorBuilder};
