#![cfg(windows)]

use windows_sys::Win32::System::Diagnostics::Debug::{DebugBreak, IsDebuggerPresent};

/// Reports whether the current process is being traced by a debugger.
pub fn debugger_attached() -> bool {
    // Safety: IsDebuggerPresent reads a PEB flag and takes no arguments.
    unsafe { IsDebuggerPresent() != 0 }
}

/// Raises a breakpoint exception for an attached debugger.
///
/// With no debugger attached the exception is unhandled and terminates the
/// process, so callers gate this behind [`debugger_attached`].
pub fn debugger_break() {
    // Safety: DebugBreak raises int3 and takes no arguments.
    unsafe { DebugBreak() };
}
