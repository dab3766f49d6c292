//! Intensity-gated diagnostic messaging.
//!
//! `inform` is the non-fatal sibling of the assertion routines: it reports
//! instead of halting. Messages print to standard error tagged with the call
//! site, and with the `tracing` feature enabled they are also emitted as
//! `tracing` debug events. Active during testing and debugging; release
//! builds emit nothing.
//!
//! The suppressed branch of every assertion reports through [`inform_if`]
//! with an intensity of `i64::MIN`, which passes the gate at any level.

use std::panic::Location;

use crate::debugger;
use crate::intensity::gate_passes;

/// Prints `message` when `intensity` is at or below the current level.
///
/// With `debugger_break` set and a debugger attached, stops in the debugger
/// after printing. Active during testing and debugging; release builds emit
/// nothing and never evaluate `message`.
#[track_caller]
pub fn inform(message: impl FnOnce() -> String, intensity: i64, debugger_break: bool) {
    inform_if(|| true, message, intensity, debugger_break);
}

/// Prints `message` when `intensity` passes the gate and `condition` holds.
///
/// The gate is consulted first; `condition` is never evaluated for a
/// suppressed call, and `message` is never evaluated unless it will print.
#[track_caller]
pub fn inform_if(
    condition: impl FnOnce() -> bool,
    message: impl FnOnce() -> String,
    intensity: i64,
    debugger_break: bool,
) {
    if cfg!(debug_assertions) && gate_passes(intensity) && condition() {
        emit(&message(), Location::caller(), debugger_break);
    }
}

fn emit(message: &str, location: &'static Location<'static>, debugger_break: bool) {
    eprintln!("{message} [{location}]");

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "covenant",
        file = location.file(),
        line = location.line(),
        "{message}"
    );

    if debugger_break && debugger::debugger_attached() {
        debugger::debugger_break();
    }
}
