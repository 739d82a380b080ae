//! Accumulating field validation for builders and configs.
//!
//! Every check runs, and all failures are reported together rather than
//! stopping at the first one.

use super::error::{ConfigError, Violation};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single field check.
pub type Check = Validation<(), NonEmptyVec<Violation>>;

/// Pass when `ok`, otherwise fail with the violation built by `violation`.
pub fn check<F>(ok: bool, violation: F) -> Check
where
    F: FnOnce() -> Violation,
{
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Pass when a required field was provided.
pub fn require<T>(value: &Option<T>, field: &'static str) -> Check {
    check(value.is_some(), || Violation::Missing { field })
}

/// Combine checks into a single result carrying every violation.
pub fn all(checks: Vec<Check>) -> Result<(), ConfigError> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(ConfigError::Invalid {
            violations: errors.iter().cloned().collect(),
        }),
    }
}
