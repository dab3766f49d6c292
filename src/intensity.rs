//! The process-wide intensity level that grades assertion activity.
//!
//! Every assertion and messaging routine in this crate carries an `intensity`
//! argument (the macros default it to zero). A call site is active when its
//! intensity is at or below the level stored here, so expensive diagnostics
//! can be written at level 1, 2, 3... and left in the code, inert, until the
//! level is raised. Lowering the level quiets them again without touching the
//! call sites.
//!
//! The level defaults to zero, which keeps every default-intensity assertion
//! active. Setting it below zero is the kill switch: no non-negative call
//! site can pass the gate, and only the unconditional `*_failure` routines
//! still fire.
//!
//! The level is a single atomic with relaxed ordering. It is expected to be
//! written from one place (startup or test setup) while other threads read;
//! concurrent writers race without corruption but with no ordering guarantee.

use std::sync::atomic::{AtomicI64, Ordering};

/// Environment variable consulted by [`load_intensity_from_env`].
pub const INTENSITY_ENV: &str = "COVENANT_INTENSITY";

static INTENSITY_LEVEL: AtomicI64 = AtomicI64::new(0);

/// Returns the current process-wide intensity level.
#[inline]
pub fn intensity_level() -> i64 {
    INTENSITY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the process-wide intensity level.
///
/// Call sites with `intensity <= level` are active. A negative `level`
/// deactivates every call site that uses the default intensity of zero.
///
/// Hosts that also embed a second assertion runtime should write through
/// [`crate::bridge::set_bridged_intensity_level`] instead, which keeps the
/// two levels equal.
#[inline]
pub fn set_intensity_level(level: i64) {
    INTENSITY_LEVEL.store(level, Ordering::Relaxed);
}

/// Reports whether a call site at `intensity` is active at the current level.
#[inline]
pub(crate) fn gate_passes(intensity: i64) -> bool {
    intensity <= intensity_level()
}

/// Applies `COVENANT_INTENSITY` from the environment, if set and parseable.
///
/// Returns the level that was applied, or `None` when the variable is unset
/// or not an integer. The environment is never consulted implicitly; hosts
/// that want environment control call this once during startup.
pub fn load_intensity_from_env() -> Option<i64> {
    let level = std::env::var(INTENSITY_ENV).ok()?.trim().parse::<i64>().ok()?;
    set_intensity_level(level);
    Some(level)
}

/// Runs `block` when `intensity` is at or below the current level.
///
/// Useful for staging diagnostic work (logging, consistency sweeps) that
/// should only run at elevated levels. Active during testing and debugging;
/// release builds skip the block regardless of the level.
///
/// # Example
///
/// ```
/// covenant::set_intensity_level(2);
/// let mut audited = false;
/// covenant::perform_if_intensity(2, || audited = true);
/// assert_eq!(audited, cfg!(debug_assertions));
/// covenant::set_intensity_level(0);
/// ```
#[inline]
pub fn perform_if_intensity(intensity: i64, block: impl FnOnce()) {
    if cfg!(debug_assertions) && gate_passes(intensity) {
        block();
    }
}
