//! The replaceable failure backend behind every assertion.
//!
//! Dispatch routines never call `panic!` directly; when a contract fails they
//! route through the process-wide [`AssertionBackend`] installed here. The
//! default [`NativeBackend`] carries the host's normal termination semantics.
//! Test harnesses substitute a recording backend for the duration of one
//! expectation and restore the native one afterwards (see [`crate::testing`]).
//!
//! Installed backends are not validated. A backend that returns control from
//! a slot the native backend would not return from changes the observable
//! behavior of code under contract; that is exactly what the test harness
//! relies on, and exactly why substitution belongs in tests only.

use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock};

/// Strategy interface for the four failure paths of the dispatcher.
///
/// A slot is only invoked for a contract that has already failed, so the
/// `condition` slots always receive `false` from this crate. The `location`
/// identifies the originating call site and is carried through unchanged.
/// What a slot does with the report, including whether it returns control
/// at all, is up to the implementation.
pub trait AssertionBackend: Send + Sync {
    /// Receives `check` and `ensure` failures. Debug-only semantics under
    /// the native backend.
    fn on_assert(&self, condition: bool, message: &str, location: &'static Location<'static>);

    /// Receives `check_failure` and `ensure_failure`. Debug-only semantics
    /// under the native backend.
    fn on_assert_failure(&self, message: &str, location: &'static Location<'static>);

    /// Receives `require` failures. Active in every build profile.
    fn on_precondition(&self, condition: bool, message: &str, location: &'static Location<'static>);

    /// Receives `require_failure`. Active in every build profile; under the
    /// native backend this never returns control to the failed path.
    fn on_precondition_failure(&self, message: &str, location: &'static Location<'static>);
}

/// The host-native backend: `assert!` and `panic!` semantics.
///
/// `on_precondition` and `on_precondition_failure` halt in every build
/// profile. `on_assert` and `on_assert_failure` halt in debug builds and do
/// nothing in release builds, matching `debug_assert!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBackend;

impl AssertionBackend for NativeBackend {
    fn on_assert(&self, condition: bool, message: &str, location: &'static Location<'static>) {
        debug_assert!(condition, "{message} [{location}]");
    }

    fn on_assert_failure(&self, message: &str, location: &'static Location<'static>) {
        if cfg!(debug_assertions) {
            panic!("{message} [{location}]");
        }
    }

    fn on_precondition(&self, condition: bool, message: &str, location: &'static Location<'static>) {
        assert!(condition, "{message} [{location}]");
    }

    fn on_precondition_failure(&self, message: &str, location: &'static Location<'static>) {
        panic!("{message} [{location}]");
    }
}

/// `None` means the native backend is active. Keeping the default as `None`
/// lets the common path run without ever allocating an `Arc`.
static BACKEND_OVERRIDE: RwLock<Option<Arc<dyn AssertionBackend>>> = RwLock::new(None);

/// Installs `backend` process-wide, returning the previously installed one.
///
/// `None` means the native backend was active. Substitution is process-wide
/// state; callers that install are responsible for restoring, normally via
/// [`reset_backend`] in a drop guard. The expectation functions in
/// [`crate::testing`] do this bookkeeping for you.
pub fn install_backend(backend: Arc<dyn AssertionBackend>) -> Option<Arc<dyn AssertionBackend>> {
    let mut slot = BACKEND_OVERRIDE.write().unwrap_or_else(PoisonError::into_inner);
    slot.replace(backend)
}

/// Restores the native backend, returning the override that was active.
pub fn reset_backend() -> Option<Arc<dyn AssertionBackend>> {
    let mut slot = BACKEND_OVERRIDE.write().unwrap_or_else(PoisonError::into_inner);
    slot.take()
}

/// Runs `f` against the active backend.
///
/// The registry read lock is held for the duration of `f`, so a backend that
/// installs or resets from inside a slot deadlocks on its own call.
pub(crate) fn with_backend(f: impl FnOnce(&dyn AssertionBackend)) {
    let guard = BACKEND_OVERRIDE.read().unwrap_or_else(PoisonError::into_inner);
    match guard.as_deref() {
        Some(backend) => f(backend),
        None => f(&NativeBackend),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn native_precondition_passes_on_true() {
        NativeBackend.on_precondition(true, "fine", Location::caller());
    }

    #[test]
    fn native_precondition_panics_on_false() {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            NativeBackend.on_precondition(false, "boom", Location::caller());
        }));
        assert!(outcome.is_err());
    }

    #[test]
    fn native_precondition_failure_always_panics() {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            NativeBackend.on_precondition_failure("boom", Location::caller());
        }));
        assert!(outcome.is_err());
    }

    #[test]
    fn native_assert_matches_build_profile() {
        let panicked = catch_unwind(AssertUnwindSafe(|| {
            NativeBackend.on_assert(false, "boom", Location::caller());
        }))
        .is_err();
        assert_eq!(panicked, cfg!(debug_assertions));
    }

    #[test]
    fn native_panic_carries_location() {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            NativeBackend.on_precondition_failure("boom", Location::caller());
        }));
        let payload = outcome.unwrap_err();
        let text = payload
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_default();
        assert!(text.contains("boom"));
        assert!(text.contains(file!()));
    }
}
