//! Capabilities the engine consumes from its host.
//!
//! The engine never talks to hardware or a telemetry transport directly;
//! it only sees these narrow traits.

use std::rc::Rc;

/// A boolean input such as a gamepad button or limit switch.
pub trait DigitalInput {
    fn is_active(&self) -> bool;
}

/// A scalar input such as a joystick axis. Used by live-configure hooks.
pub trait RangeInput {
    fn value(&self) -> f32;
}

/// Write-only, best-effort telemetry sink.
pub trait Telemetry {
    fn report(&self, key: &str, value: &str);
}

impl<F> DigitalInput for F
where
    F: Fn() -> bool,
{
    fn is_active(&self) -> bool {
        self()
    }
}

impl<T: RangeInput + ?Sized> RangeInput for Rc<T> {
    fn value(&self) -> f32 {
        (**self).value()
    }
}

impl<T: Telemetry + ?Sized> Telemetry for Rc<T> {
    fn report(&self, key: &str, value: &str) {
        (**self).report(key, value)
    }
}
