#![cfg(unix)]

/// Reports whether the current process is being traced by a debugger.
///
/// Linux reads `TracerPid` from `/proc/self/status`; macOS asks the kernel
/// for the process flags. The answer reflects this instant, so a debugger
/// attached afterwards is picked up by the next call.
#[cfg(target_os = "linux")]
pub fn debugger_attached() -> bool {
    let status = match std::fs::read_to_string("/proc/self/status") {
        Ok(status) => status,
        Err(_) => return false,
    };

    status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .and_then(|pid| pid.trim().parse::<u32>().ok())
        .map(|pid| pid != 0)
        .unwrap_or(false)
}

/// Reports whether the current process is being traced by a debugger.
#[cfg(target_os = "macos")]
pub fn debugger_attached() -> bool {
    use libc::{c_int, c_void, kinfo_proc, sysctl, CTL_KERN, KERN_PROC, KERN_PROC_PID};

    // P_TRACED from sys/proc.h; not exported by libc.
    const P_TRACED: c_int = 0x0000_0800;

    let mut info: kinfo_proc = unsafe { std::mem::zeroed() };
    let mut size = std::mem::size_of::<kinfo_proc>();
    let mut mib: [c_int; 4] = [CTL_KERN, KERN_PROC, KERN_PROC_PID, unsafe { libc::getpid() }];

    // Safety: mib names a kernel table, info/size describe a matching buffer.
    let rc = unsafe {
        sysctl(
            mib.as_mut_ptr(),
            mib.len() as u32,
            std::ptr::addr_of_mut!(info).cast::<c_void>(),
            &mut size,
            std::ptr::null_mut(),
            0,
        )
    };

    rc == 0 && (info.kp_proc.p_flag & P_TRACED) != 0
}

/// No tracing probe on this platform.
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub fn debugger_attached() -> bool {
    false
}

/// Stops the process so an attached debugger can take over.
///
/// Raises `SIGSTOP`; with no debugger attached the process suspends until it
/// receives `SIGCONT`, so callers gate this behind [`debugger_attached`].
pub fn debugger_break() {
    // Safety: raising a signal at our own process has no memory effects.
    unsafe {
        libc::raise(libc::SIGSTOP);
    }
}
