//! Call-site macros over the dispatch functions.
//!
//! The functions in [`crate::contract`] take explicit thunks so a passing or
//! suppressed call costs almost nothing. These macros wrap ordinary
//! expressions into those thunks and fill in the defaults: empty message,
//! intensity zero. The message position accepts `format!` syntax; the
//! intensity is named explicitly at the call site, `intensity = <expr>`.

/// Checks a necessary precondition for making forward progress.
///
/// Expands to [`crate::require`]. Active in every build profile.
///
/// # Example
///
/// ```
/// use covenant::require;
///
/// let len = 4usize;
/// require!(len > 0);
/// require!(len % 2 == 0, "len {} must be even", len);
/// require!(len < 1 << 20, intensity = 1, "len {} suspiciously large", len);
/// ```
#[macro_export]
macro_rules! require {
    ($condition:expr $(,)?) => {
        $crate::require(|| $condition, ::std::string::String::new, 0)
    };
    ($condition:expr, intensity = $intensity:expr $(,)?) => {
        $crate::require(|| $condition, ::std::string::String::new, $intensity)
    };
    ($condition:expr, intensity = $intensity:expr, $($message:tt)+) => {
        $crate::require(|| $condition, || ::std::format!($($message)+), $intensity)
    };
    ($condition:expr, $($message:tt)+) => {
        $crate::require(|| $condition, || ::std::format!($($message)+), 0)
    };
}

/// Marks a path that must never execute, in any build profile.
///
/// Expands to [`crate::require_failure`]. Takes no condition and ignores
/// the intensity level.
#[macro_export]
macro_rules! require_failure {
    () => {
        $crate::require_failure(::std::string::String::new)
    };
    ($($message:tt)+) => {
        $crate::require_failure(|| ::std::format!($($message)+))
    };
}

/// Checks that an internal invariant still holds. Debug builds only.
///
/// Expands to [`crate::check`].
///
/// # Example
///
/// ```
/// use covenant::check;
///
/// let queue: Vec<u32> = vec![1, 2, 3];
/// check!(!queue.is_empty());
/// check!(queue.len() <= 64, "queue grew to {}", queue.len());
/// ```
#[macro_export]
macro_rules! check {
    ($condition:expr $(,)?) => {
        $crate::check(|| $condition, ::std::string::String::new, 0)
    };
    ($condition:expr, intensity = $intensity:expr $(,)?) => {
        $crate::check(|| $condition, ::std::string::String::new, $intensity)
    };
    ($condition:expr, intensity = $intensity:expr, $($message:tt)+) => {
        $crate::check(|| $condition, || ::std::format!($($message)+), $intensity)
    };
    ($condition:expr, $($message:tt)+) => {
        $crate::check(|| $condition, || ::std::format!($($message)+), 0)
    };
}

/// Marks an internal path that must never execute. Debug builds only.
///
/// Expands to [`crate::check_failure`].
#[macro_export]
macro_rules! check_failure {
    () => {
        $crate::check_failure(::std::string::String::new)
    };
    ($($message:tt)+) => {
        $crate::check_failure(|| ::std::format!($($message)+))
    };
}

/// Checks a postcondition on the state this code leaves behind. Debug
/// builds only.
///
/// Expands to [`crate::ensure`].
#[macro_export]
macro_rules! ensure {
    ($condition:expr $(,)?) => {
        $crate::ensure(|| $condition, ::std::string::String::new, 0)
    };
    ($condition:expr, intensity = $intensity:expr $(,)?) => {
        $crate::ensure(|| $condition, ::std::string::String::new, $intensity)
    };
    ($condition:expr, intensity = $intensity:expr, $($message:tt)+) => {
        $crate::ensure(|| $condition, || ::std::format!($($message)+), $intensity)
    };
    ($condition:expr, $($message:tt)+) => {
        $crate::ensure(|| $condition, || ::std::format!($($message)+), 0)
    };
}

/// Marks a postcondition path that must never execute. Debug builds only.
///
/// Expands to [`crate::ensure_failure`].
#[macro_export]
macro_rules! ensure_failure {
    () => {
        $crate::ensure_failure(::std::string::String::new)
    };
    ($($message:tt)+) => {
        $crate::ensure_failure(|| ::std::format!($($message)+))
    };
}

/// Prints an intensity-gated diagnostic message. Debug builds only.
///
/// Expands to [`crate::inform`] with the debugger-break flag off; call the
/// function directly to request a break.
///
/// # Example
///
/// ```
/// use covenant::inform;
///
/// inform!("cache warmed");
/// inform!(intensity = 2, "rebalance pass {}", 7);
/// ```
#[macro_export]
macro_rules! inform {
    (intensity = $intensity:expr, $($message:tt)+) => {
        $crate::inform(|| ::std::format!($($message)+), $intensity, false)
    };
    ($($message:tt)+) => {
        $crate::inform(|| ::std::format!($($message)+), 0, false)
    };
}

/// Prints an intensity-gated message when `condition` holds. Debug builds
/// only.
///
/// Expands to [`crate::inform_if`] with the debugger-break flag off.
#[macro_export]
macro_rules! inform_if {
    ($condition:expr, intensity = $intensity:expr, $($message:tt)+) => {
        $crate::inform_if(|| $condition, || ::std::format!($($message)+), $intensity, false)
    };
    ($condition:expr, $($message:tt)+) => {
        $crate::inform_if(|| $condition, || ::std::format!($($message)+), 0, false)
    };
}
