//! Debugger attachment probe and programmatic break.

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

#[cfg(unix)]
pub use unix::*;

#[cfg(windows)]
pub use windows::*;

/// Reports whether a debugger is attached. No probe exists for this target.
#[cfg(not(any(unix, windows)))]
pub fn debugger_attached() -> bool {
    false
}

/// Stops for an attached debugger. No-op on this target.
#[cfg(not(any(unix, windows)))]
pub fn debugger_break() {}
