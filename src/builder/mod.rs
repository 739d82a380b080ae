//! Builder API for linking states into sequences.
//!
//! Most robot routines are a straight line of steps: move, wait, actuate,
//! wait again. [`SequenceBuilder`] registers those steps and wires each one
//! to the next so the author never sets links by hand.

pub mod sequence;

pub use sequence::{Sequence, SequenceBuilder};
