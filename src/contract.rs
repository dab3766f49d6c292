//! The design-by-contract dispatch routines.
//!
//! Three graded assertions cover the three clauses of a contract:
//!
//! - [`require`] states a precondition. It binds the caller and stays active
//!   in every build profile.
//! - [`check`] states an internal consistency condition. Debug builds only.
//! - [`ensure`] states a postcondition. Debug builds only.
//!
//! Each takes the condition and the message as thunks so that a passing
//! condition costs one closure call and a suppressed one costs an atomic
//! load. The `*_failure` variants mark paths that are themselves the
//! violation (the `match` arm that must be dead) and take no condition.
//!
//! A call site whose intensity is above the current level does not fail
//! hard; it downgrades to a report through [`crate::inform_if`] so raising
//! the level later turns the same site back into a real assertion. The
//! `*_failure` variants carry no intensity and never downgrade.
//!
//! Failures route through the installed [`crate::backend::AssertionBackend`],
//! never through a direct `panic!`.

use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::backend::with_backend;
use crate::inform::inform_if;
use crate::intensity::gate_passes;

pub(crate) const REQUIRE_PREFIX: &str = "failed require : ";
pub(crate) const CHECK_PREFIX: &str = "failed check : ";
pub(crate) const ENSURE_PREFIX: &str = "failed ensure : ";

static BREAK_ON_ASSERTION_FAILURES: AtomicBool = AtomicBool::new(false);

/// Reports whether suppressed assertion failures stop in the debugger.
#[inline]
pub fn break_on_assertion_failures() -> bool {
    BREAK_ON_ASSERTION_FAILURES.load(Ordering::Relaxed)
}

/// Controls whether suppressed assertion failures stop in the debugger.
///
/// Applies to the downgraded reports emitted when a failing call site sits
/// above the current intensity level. Defaults to off; has no effect unless
/// a debugger is attached.
#[inline]
pub fn set_break_on_assertion_failures(enabled: bool) {
    BREAK_ON_ASSERTION_FAILURES.store(enabled, Ordering::Relaxed);
}

/// Checks a necessary precondition for making forward progress.
///
/// Use this for conditions the caller is contractually obliged to meet,
/// such as argument ranges or required state. `require` is active in every
/// build profile; a failing condition at or below the current intensity
/// level halts through the installed backend.
///
/// `condition` is evaluated at most once. `message` is only evaluated when
/// the report will actually be produced, so an expensive description costs
/// nothing on the passing path.
///
/// # Example
///
/// ```
/// fn set_ratio(ratio: f64) {
///     covenant::require(
///         || (0.0..=1.0).contains(&ratio),
///         || format!("ratio {ratio} out of range"),
///         0,
///     );
/// }
/// set_ratio(0.25);
/// ```
#[track_caller]
pub fn require(condition: impl FnOnce() -> bool, message: impl FnOnce() -> String, intensity: i64) {
    let location = Location::caller();
    if gate_passes(intensity) {
        if !condition() {
            let text = format!("{REQUIRE_PREFIX}{}", message());
            with_backend(|backend| backend.on_precondition(false, &text, location));
        }
    } else {
        inform_if(
            move || !condition(),
            move || format!("failed require({intensity}): {}", message()),
            i64::MIN,
            break_on_assertion_failures(),
        );
    }
}

/// Marks a path that must never execute, in any build profile.
///
/// The unreachable `else`, the impossible `match` arm. Ignores the intensity
/// level entirely; under the native backend this does not return.
#[track_caller]
pub fn require_failure(message: impl FnOnce() -> String) {
    let location = Location::caller();
    let text = format!("{REQUIRE_PREFIX}{}", message());
    with_backend(|backend| backend.on_precondition_failure(&text, location));
}

/// Checks that an internal invariant still holds.
///
/// Use this for sanity conditions inside your own code, where a failure
/// means a bug here rather than a misbehaving caller. Active during testing
/// and debugging; release builds skip the condition entirely.
#[track_caller]
pub fn check(condition: impl FnOnce() -> bool, message: impl FnOnce() -> String, intensity: i64) {
    if cfg!(debug_assertions) {
        let location = Location::caller();
        if gate_passes(intensity) {
            if !condition() {
                let text = format!("{CHECK_PREFIX}{}", message());
                with_backend(|backend| backend.on_assert(false, &text, location));
            }
        } else {
            inform_if(
                move || !condition(),
                move || format!("failed check({intensity}): {}", message()),
                i64::MIN,
                break_on_assertion_failures(),
            );
        }
    }
}

/// Marks an internal path that must never execute. Debug builds only.
#[track_caller]
pub fn check_failure(message: impl FnOnce() -> String) {
    if cfg!(debug_assertions) {
        let location = Location::caller();
        let text = format!("{CHECK_PREFIX}{}", message());
        with_backend(|backend| backend.on_assert_failure(&text, location));
    }
}

/// Checks a postcondition: the state this code promised to leave behind.
///
/// The guarantee side of the contract, where `require` is the obligation
/// side. Active during testing and debugging; release builds skip the
/// condition entirely.
#[track_caller]
pub fn ensure(condition: impl FnOnce() -> bool, message: impl FnOnce() -> String, intensity: i64) {
    if cfg!(debug_assertions) {
        let location = Location::caller();
        if gate_passes(intensity) {
            if !condition() {
                let text = format!("{ENSURE_PREFIX}{}", message());
                with_backend(|backend| backend.on_assert(false, &text, location));
            }
        } else {
            inform_if(
                move || !condition(),
                move || format!("failed ensure({intensity}): {}", message()),
                i64::MIN,
                break_on_assertion_failures(),
            );
        }
    }
}

/// Marks a postcondition path that must never execute. Debug builds only.
#[track_caller]
pub fn ensure_failure(message: impl FnOnce() -> String) {
    if cfg!(debug_assertions) {
        let location = Location::caller();
        let text = format!("{ENSURE_PREFIX}{}", message());
        with_backend(|backend| backend.on_assert_failure(&text, location));
    }
}
