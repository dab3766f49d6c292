//! End-to-end tests for the dispatch routines and their intensity gating.

use covenant::testing::{expect_check, expect_ensure, expect_require, expect_require_failure};
use covenant::{
    check, ensure, inform_if, intensity_level, load_intensity_from_env, perform_if_intensity,
    require, set_intensity_level, INTENSITY_ENV,
};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The intensity level and backend override are process-wide; tests in this
/// binary that touch them take this lock first.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

#[test]
fn test_require_reports_failing_condition() {
    let _guard = serial();
    set_intensity_level(0);
    expect_require(Some("5 equals 6"), || {
        require(|| 5 == 6, || "5 equals 6".to_owned(), 0);
    });
}

#[test]
fn test_require_empty_message_keeps_prefix() {
    let _guard = serial();
    set_intensity_level(0);
    expect_require(Some(""), || require(|| false, String::new, 0));
}

#[test]
fn test_require_failure_fires_unconditionally() {
    let _guard = serial();
    set_intensity_level(0);
    expect_require_failure(Some("fell off the map"), || {
        covenant::require_failure(|| "fell off the map".to_owned());
    });
}

#[test]
fn test_check_reports_failing_condition() {
    let _guard = serial();
    set_intensity_level(0);
    if cfg!(debug_assertions) {
        expect_check(Some("scan order broken"), || {
            check(|| 1 > 2, || "scan order broken".to_owned(), 0);
        });
    } else {
        // Inert in release builds.
        check(|| 1 > 2, || "scan order broken".to_owned(), 0);
    }
}

#[test]
fn test_check_failure_is_debug_only() {
    let _guard = serial();
    set_intensity_level(0);
    if cfg!(debug_assertions) {
        covenant::testing::expect_check_failure(Some("dead arm"), || {
            covenant::check_failure(|| "dead arm".to_owned());
        });
    } else {
        covenant::check_failure(|| "dead arm".to_owned());
    }
}

#[test]
fn test_ensure_reports_failing_condition() {
    let _guard = serial();
    set_intensity_level(0);
    if cfg!(debug_assertions) {
        expect_ensure(Some("left dirty state"), || {
            ensure(|| false, || "left dirty state".to_owned(), 0);
        });
    } else {
        ensure(|| false, || "left dirty state".to_owned(), 0);
    }
}

#[test]
fn test_ensure_failure_is_debug_only() {
    let _guard = serial();
    set_intensity_level(0);
    if cfg!(debug_assertions) {
        covenant::testing::expect_ensure_failure(Some("no rollback path"), || {
            covenant::ensure_failure(|| "no rollback path".to_owned());
        });
    } else {
        covenant::ensure_failure(|| "no rollback path".to_owned());
    }
}

#[test]
fn test_passing_conditions_stay_silent() {
    let _guard = serial();
    set_intensity_level(0);
    require(|| true, || "never rendered".to_owned(), 0);
    check(|| true, || "never rendered".to_owned(), 0);
    ensure(|| true, || "never rendered".to_owned(), 0);
}

#[test]
fn test_contract_triad_end_to_end() {
    let _guard = serial();
    set_intensity_level(0);

    let balance: i32 = 40;
    covenant::require!(balance >= 0);
    covenant::check!(balance % 2 == 0, "odd balance {}", balance);
    covenant::ensure!(balance <= 100);

    expect_require(Some("insufficient funds: 40 < 75"), || {
        covenant::require!(balance >= 75, "insufficient funds: {} < {}", balance, 75);
    });
}

#[test]
fn test_intensity_graded_sites() {
    let _guard = serial();
    set_intensity_level(10);

    // At or below the level: hard assertions.
    expect_require(Some("under level"), || {
        covenant::require!(false, intensity = 5, "under level");
    });
    expect_require(Some("at level"), || {
        covenant::require!(false, intensity = 10, "at level");
    });
    if cfg!(debug_assertions) {
        expect_check(Some("at level"), || {
            covenant::check!(false, intensity = 10, "at level");
        });
    }

    // Above the level: downgraded to reports, no backend call.
    covenant::require!(false, intensity = 11, "soft");
    covenant::check!(false, intensity = 15, "soft");
    covenant::ensure!(false, intensity = 15, "soft");

    set_intensity_level(0);
}

#[test]
fn test_negative_level_is_a_kill_switch() {
    let _guard = serial();
    set_intensity_level(-1);

    // Default-intensity sites go quiet.
    covenant::require!(1 == 2, "must stay quiet");
    covenant::check!(1 == 2);
    covenant::ensure!(1 == 2);

    // The unconditional failures ignore the level entirely.
    expect_require_failure(Some("still fatal"), || {
        covenant::require_failure!("still fatal");
    });

    set_intensity_level(0);
}

#[test]
fn test_thunks_not_evaluated_on_pass() {
    let _guard = serial();
    set_intensity_level(0);

    let mut rendered = false;
    require(
        || true,
        || {
            rendered = true;
            String::new()
        },
        0,
    );
    assert!(!rendered, "message thunk ran for a passing require");

    let mut rendered = false;
    check(
        || true,
        || {
            rendered = true;
            String::new()
        },
        0,
    );
    assert!(!rendered, "message thunk ran for a passing check");
}

#[test]
fn test_condition_evaluated_once_when_firing() {
    let _guard = serial();
    set_intensity_level(0);

    let mut evaluations = 0;
    expect_require(None, || {
        require(
            || {
                evaluations += 1;
                false
            },
            String::new,
            0,
        );
    });
    assert_eq!(evaluations, 1);
}

#[test]
fn test_suppressed_site_evaluates_condition_once() {
    let _guard = serial();
    set_intensity_level(0);

    let mut evaluations = 0;
    require(
        || {
            evaluations += 1;
            false
        },
        String::new,
        7,
    );
    // The downgraded report still needs the verdict, in debug builds only.
    assert_eq!(evaluations, i32::from(cfg!(debug_assertions)));
}

#[test]
fn test_inform_if_skips_message_when_condition_fails() {
    let _guard = serial();
    set_intensity_level(0);

    let mut rendered = false;
    inform_if(
        || false,
        || {
            rendered = true;
            String::new()
        },
        0,
        false,
    );
    assert!(!rendered);

    // Above the level, the condition itself must not run.
    let mut probed = false;
    inform_if(
        || {
            probed = true;
            true
        },
        String::new,
        5,
        false,
    );
    assert!(!probed);
}

#[test]
fn test_perform_if_intensity_gates_block() {
    let _guard = serial();
    set_intensity_level(10);

    let mut ran = false;
    perform_if_intensity(5, || ran = true);
    assert_eq!(ran, cfg!(debug_assertions));

    let mut skipped = false;
    perform_if_intensity(15, || skipped = true);
    assert!(!skipped);

    set_intensity_level(0);
}

#[test]
fn test_break_flag_roundtrip() {
    let _guard = serial();
    assert!(!covenant::break_on_assertion_failures());
    covenant::set_break_on_assertion_failures(true);
    assert!(covenant::break_on_assertion_failures());
    covenant::set_break_on_assertion_failures(false);
}

#[test]
fn test_load_intensity_from_env() {
    let _guard = serial();
    set_intensity_level(0);

    std::env::set_var(INTENSITY_ENV, "3");
    assert_eq!(load_intensity_from_env(), Some(3));
    assert_eq!(intensity_level(), 3);

    // Unset and unparseable inputs leave the level alone.
    std::env::remove_var(INTENSITY_ENV);
    assert_eq!(load_intensity_from_env(), None);
    assert_eq!(intensity_level(), 3);

    std::env::set_var(INTENSITY_ENV, "not a level");
    assert_eq!(load_intensity_from_env(), None);
    assert_eq!(intensity_level(), 3);

    std::env::remove_var(INTENSITY_ENV);
    set_intensity_level(0);
}
