//! # `covenant` - Design-by-Contract Assertion Toolkit
//!
//! Graded, swappable assertions for stating contracts in code: what a caller
//! must guarantee before a routine runs, and what the routine guarantees
//! back. Contracts stay in the source as executable documentation, with
//! per-call-site control over how loudly they fail.
//!
//! ## The Contract Triad
//!
//! 1. **`require`** (precondition):
//!    - The caller's obligation, such as argument ranges or required state
//!    - Active in every build profile
//!    - A violation is a bug in the *caller*
//!
//! 2. **`check`** (invariant):
//!    - A consistency condition inside your own code
//!    - Active during testing and debugging, skipped in release builds
//!    - A violation is a bug *here*
//!
//! 3. **`ensure`** (postcondition):
//!    - The state this code promised to leave behind
//!    - Active during testing and debugging, skipped in release builds
//!
//! Each has a `*_failure` variant for paths that are themselves the
//! violation, such as the unreachable `else` or the `match` arm that must
//! be dead. The failure variants take no condition and ignore intensity;
//! `require_failure` halts in every build profile.
//!
//! ### Intensity Grading
//!
//! Every call site carries an intensity (default zero) and fires only when
//! that intensity is at or below the process-wide level. Expensive
//! diagnostics go in at level 1 or 2 and stay inert until the level is
//! raised. A failing site above the level does not fail hard; it downgrades
//! to an [`inform_if`] report, so raising the level later turns the same
//! site back into a real assertion. Setting the level negative is the kill
//! switch for every default-intensity site.
//!
//! ### The Failure Backend
//!
//! No dispatch routine calls `panic!` directly. Failures route through the
//! installed [`AssertionBackend`]; the default [`NativeBackend`] carries
//! `assert!`/`panic!` semantics, and tests substitute a recording backend
//! through [`testing`] to observe failures that would otherwise end the
//! process. Condition and message arguments are thunks and are only
//! evaluated when a report is actually produced.
//!
//! ## Testing Contracts
//!
//! The [`testing`] module turns "this input must fail its `require`" into an
//! ordinary passing test:
//!
//! ```rust
//! use covenant::require;
//! use covenant::testing::expect_require;
//!
//! fn set_gain(gain: f32) {
//!     require!(gain.is_finite(), "gain must be finite");
//! }
//!
//! expect_require(Some("gain must be finite"), || set_gain(f32::NAN));
//! ```
//!
//! ## Example
//!
//! ```rust
//! use covenant::{ensure, require, RequireOption};
//!
//! fn reserve_seat(seat: Option<u32>, capacity: u32) -> u32 {
//!     let seat = seat.require();
//!     require!(seat < capacity, "seat {} exceeds capacity {}", seat, capacity);
//!     let confirmed = seat;
//!     ensure!(confirmed < capacity);
//!     confirmed
//! }
//!
//! assert_eq!(reserve_seat(Some(11), 64), 11);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod backend;
pub mod bridge;
pub mod contract;
pub mod debugger;
pub mod inform;
pub mod intensity;
mod macros;
pub mod option;
pub mod testing;

pub use backend::{install_backend, reset_backend, AssertionBackend, NativeBackend};
pub use bridge::{
    bridged_intensity_level, clear_foreign_intensity_setter, register_foreign_intensity_setter,
    set_bridged_intensity_level, ForeignIntensitySetter,
};
pub use contract::{
    break_on_assertion_failures, check, check_failure, ensure, ensure_failure, require,
    require_failure, set_break_on_assertion_failures,
};
pub use debugger::{debugger_attached, debugger_break};
pub use inform::{inform, inform_if};
pub use intensity::{
    intensity_level, load_intensity_from_env, perform_if_intensity, set_intensity_level,
    INTENSITY_ENV,
};
pub use option::{RequireDowncast, RequireOption};

// Compile-time assertions for layout claims the dispatch path relies on.
const _: () = {
    use core::mem;

    // The native backend is a stateless handle.
    assert!(mem::size_of::<NativeBackend>() == 0);

    // The backend override slot stays two words: data pointer plus vtable,
    // with `None` in the pointer niche.
    assert!(
        mem::size_of::<Option<std::sync::Arc<dyn AssertionBackend>>>()
            == mem::size_of::<usize>() * 2
    );
};
