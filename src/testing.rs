//! Unit-testing support: observe assertion firings instead of crashing.
//!
//! The native backend halts the process when a contract fails, which makes
//! "this input must fail its `require`" impossible to test directly. The
//! `expect_*` functions here substitute a recording backend for the duration
//! of one closure, wait for the capture, verify it, and restore the native
//! backend on every exit path. A wrong or missing capture is reported as an
//! ordinary test panic.
//!
//! ```
//! use covenant::require;
//! use covenant::testing::expect_require;
//!
//! expect_require(Some("sound barrier"), || {
//!     require(|| 1 == 2, || "sound barrier".to_owned(), 0);
//! });
//! ```
//!
//! One expectation runs at a time; expectations from concurrently running
//! tests queue on an internal lock. Calling an `expect_*` function from
//! inside another expectation's body deadlocks on that lock.
//!
//! The `*_failure` dispatch routines never return under the native backend,
//! so production code after such a call may be unreachable by construction.
//! Their expectations therefore run the body on its own thread: the capture
//! is still observed even if the body can never finish. A body still running
//! after the wait window is abandoned, and anything it fires after that
//! meets the restored native backend.

use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe, Location};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use crate::backend::{self, AssertionBackend, NativeBackend};
use crate::contract::{CHECK_PREFIX, ENSURE_PREFIX, REQUIRE_PREFIX};

/// How long an expectation waits for a call that, under the native backend,
/// would never have returned control.
pub const NO_RETURN_FAILURE_WAIT: Duration = Duration::from_millis(100);

/// The backend slot an expectation substitutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Assert,
    AssertFailure,
    Precondition,
    PreconditionFailure,
}

/// What a substituted slot received.
#[derive(Debug, Clone)]
struct Capture {
    condition: Option<bool>,
    message: String,
}

/// Single-use completion cell the verifying thread waits on.
struct CaptureCell {
    slot: Mutex<Option<Capture>>,
    ready: Condvar,
}

impl CaptureCell {
    fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    /// Records a capture. Last write wins when a body fires more than once.
    fn record(&self, capture: Capture) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(capture);
        self.ready.notify_all();
    }

    /// Waits until a capture arrives or `timeout` elapses.
    fn wait(&self, timeout: Duration) -> Option<Capture> {
        let guard = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut guard, _) = self
            .ready
            .wait_timeout_while(guard, timeout, |slot| slot.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        guard.take()
    }
}

/// Records calls to one slot and forwards the rest to the native backend.
struct CapturingBackend {
    captured: Slot,
    cell: Arc<CaptureCell>,
}

impl CapturingBackend {
    fn deliver(&self, slot: Slot, condition: Option<bool>, message: &str) -> bool {
        if slot == self.captured {
            self.cell.record(Capture {
                condition,
                message: message.to_owned(),
            });
            true
        } else {
            false
        }
    }
}

impl AssertionBackend for CapturingBackend {
    fn on_assert(&self, condition: bool, message: &str, location: &'static Location<'static>) {
        if !self.deliver(Slot::Assert, Some(condition), message) {
            NativeBackend.on_assert(condition, message, location);
        }
    }

    fn on_assert_failure(&self, message: &str, location: &'static Location<'static>) {
        if !self.deliver(Slot::AssertFailure, None, message) {
            NativeBackend.on_assert_failure(message, location);
        }
    }

    fn on_precondition(&self, condition: bool, message: &str, location: &'static Location<'static>) {
        if !self.deliver(Slot::Precondition, Some(condition), message) {
            NativeBackend.on_precondition(condition, message, location);
        }
    }

    fn on_precondition_failure(&self, message: &str, location: &'static Location<'static>) {
        if !self.deliver(Slot::PreconditionFailure, None, message) {
            NativeBackend.on_precondition_failure(message, location);
        }
    }
}

/// One routine under expectation, with the slot it owns and the message
/// prefix it stamps.
#[derive(Clone, Copy)]
struct Expectation {
    name: &'static str,
    slot: Slot,
    prefix: &'static str,
}

const REQUIRE: Expectation = Expectation {
    name: "require",
    slot: Slot::Precondition,
    prefix: REQUIRE_PREFIX,
};
const CHECK: Expectation = Expectation {
    name: "check",
    slot: Slot::Assert,
    prefix: CHECK_PREFIX,
};
const ENSURE: Expectation = Expectation {
    name: "ensure",
    slot: Slot::Assert,
    prefix: ENSURE_PREFIX,
};
const REQUIRE_FAILURE: Expectation = Expectation {
    name: "require_failure",
    slot: Slot::PreconditionFailure,
    prefix: REQUIRE_PREFIX,
};
const CHECK_FAILURE: Expectation = Expectation {
    name: "check_failure",
    slot: Slot::AssertFailure,
    prefix: CHECK_PREFIX,
};
const ENSURE_FAILURE: Expectation = Expectation {
    name: "ensure_failure",
    slot: Slot::AssertFailure,
    prefix: ENSURE_PREFIX,
};

/// Serializes expectations across threads.
static EXPECTATION_GATE: Mutex<()> = Mutex::new(());

/// Restores the native backend when dropped, on every exit path.
struct RestoreNative;

impl Drop for RestoreNative {
    fn drop(&mut self) {
        backend::reset_backend();
    }
}

fn expect_condition(expectation: Expectation, expected_message: Option<&str>, body: impl FnOnce()) {
    let _gate = EXPECTATION_GATE.lock().unwrap_or_else(PoisonError::into_inner);
    let _restore = RestoreNative;
    let cell = Arc::new(CaptureCell::new());
    backend::install_backend(Arc::new(CapturingBackend {
        captured: expectation.slot,
        cell: Arc::clone(&cell),
    }));

    // The routine under expectation returns control, so the body runs on
    // this thread. A panic after the capture is the halted path resuming
    // its halt and is discarded; a panic with no capture is a real crash
    // and propagates.
    let outcome = catch_unwind(AssertUnwindSafe(body));
    let capture = cell.wait(NO_RETURN_FAILURE_WAIT);

    if capture.is_none() {
        if let Err(payload) = outcome {
            resume_unwind(payload);
        }
    }

    verify(expectation, expected_message, capture);
}

fn expect_failure(
    expectation: Expectation,
    expected_message: Option<&str>,
    body: impl FnOnce() + Send + 'static,
) {
    let _gate = EXPECTATION_GATE.lock().unwrap_or_else(PoisonError::into_inner);
    let _restore = RestoreNative;
    let cell = Arc::new(CaptureCell::new());
    backend::install_backend(Arc::new(CapturingBackend {
        captured: expectation.slot,
        cell: Arc::clone(&cell),
    }));

    // The routine under expectation never returns in production, so the
    // body gets its own thread. The handle is dropped, not joined; a body
    // that outlives the wait window is abandoned.
    thread::spawn(body);
    let capture = cell.wait(NO_RETURN_FAILURE_WAIT);

    verify(expectation, expected_message, capture);
}

fn verify(expectation: Expectation, expected_message: Option<&str>, capture: Option<Capture>) {
    let name = expectation.name;
    let capture = match capture {
        Some(capture) => capture,
        None => panic!("{name} is expected to be called."),
    };

    if capture.condition == Some(true) {
        panic!("{name} condition expected to be false");
    }

    if let Some(expected) = expected_message {
        let expected = format!("{}{}", expectation.prefix, expected);
        if capture.message != expected {
            panic!(
                "{name} called with incorrect message: expected {expected:?}, got {:?}",
                capture.message
            );
        }
    }
}

/// Expects the body to fail a `require`.
///
/// The body runs on the calling thread; the assertion returns control under
/// the substituted backend, so code after it keeps running. With an
/// `expected_message`, the captured text must equal `"failed require : "`
/// followed by it.
///
/// ```
/// use covenant::require;
/// use covenant::testing::expect_require;
///
/// expect_require(Some("argument out of range"), || {
///     require(|| false, || "argument out of range".to_owned(), 0);
/// });
/// ```
pub fn expect_require(expected_message: Option<&str>, body: impl FnOnce()) {
    expect_condition(REQUIRE, expected_message, body);
}

/// Expects the body to fail a `check`.
///
/// `check` fires in debug builds only; under a release profile this
/// expectation always reports a never-called failure.
pub fn expect_check(expected_message: Option<&str>, body: impl FnOnce()) {
    expect_condition(CHECK, expected_message, body);
}

/// Expects the body to fail an `ensure`.
///
/// `ensure` fires in debug builds only; under a release profile this
/// expectation always reports a never-called failure.
pub fn expect_ensure(expected_message: Option<&str>, body: impl FnOnce()) {
    expect_condition(ENSURE, expected_message, body);
}

/// Expects the body to call `require_failure`.
///
/// The body runs on its own thread and is abandoned if it outlives the
/// [`NO_RETURN_FAILURE_WAIT`] window.
///
/// ```
/// use covenant::require_failure;
/// use covenant::testing::expect_require_failure;
///
/// expect_require_failure(Some("unreachable arm"), || {
///     require_failure(|| "unreachable arm".to_owned());
/// });
/// ```
pub fn expect_require_failure(
    expected_message: Option<&str>,
    body: impl FnOnce() + Send + 'static,
) {
    expect_failure(REQUIRE_FAILURE, expected_message, body);
}

/// Expects the body to call `check_failure`.
///
/// `check_failure` fires in debug builds only; under a release profile this
/// expectation always reports a never-called failure.
pub fn expect_check_failure(expected_message: Option<&str>, body: impl FnOnce() + Send + 'static) {
    expect_failure(CHECK_FAILURE, expected_message, body);
}

/// Expects the body to call `ensure_failure`.
///
/// `ensure_failure` fires in debug builds only; under a release profile
/// this expectation always reports a never-called failure.
pub fn expect_ensure_failure(expected_message: Option<&str>, body: impl FnOnce() + Send + 'static) {
    expect_failure(ENSURE_FAILURE, expected_message, body);
}
