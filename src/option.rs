//! Contract-bearing accessors for `Option` values.
//!
//! `require()` on an option says "this must be populated here, in every
//! build profile" and hands back the value; `check()` says the same with
//! debug-only teeth and hands back the option. Both report through the
//! regular dispatch routines, so a substituted backend observes them like
//! any other assertion.

use std::any::Any;

use crate::contract;

/// Applies the dispatcher to "this option holds a value".
pub trait RequireOption {
    /// The contained value.
    type Value;

    /// Requires the option to hold a value and returns it.
    ///
    /// Active in every build profile. An absent value fires `require` with
    /// the default message.
    ///
    /// # Example
    ///
    /// ```
    /// use covenant::RequireOption;
    ///
    /// let id = Some(42u32).require();
    /// assert_eq!(id, 42);
    /// ```
    #[track_caller]
    fn require(self) -> Self::Value;

    /// Requires the option to hold a value, reporting `message` if absent.
    #[track_caller]
    fn require_msg(self, message: &str) -> Self::Value;

    /// Checks that the option holds a value and returns the option.
    ///
    /// Debug builds only. The option passes through unchanged either way,
    /// so this chains in front of ordinary option handling.
    #[track_caller]
    fn check(self) -> Self;

    /// Checks that the option holds a value, reporting `message` at the
    /// given intensity if absent.
    #[track_caller]
    fn check_msg(self, message: &str, intensity: i64) -> Self;
}

impl<T> RequireOption for Option<T> {
    type Value = T;

    fn require(self) -> T {
        self.require_msg("Required option was None.")
    }

    fn require_msg(self, message: &str) -> T {
        let present = self.is_some();
        contract::require(|| present, || message.to_owned(), 0);
        match self {
            Some(value) => value,
            // A substituted backend can return control; absence still halts.
            None => panic!("{message}"),
        }
    }

    fn check(self) -> Self {
        self.check_msg("Checked option was None.", 0)
    }

    fn check_msg(self, message: &str, intensity: i64) -> Self {
        let present = self.is_some();
        contract::check(|| present, || message.to_owned(), intensity);
        self
    }
}

/// [`RequireOption`] plus a required downcast to a concrete type.
pub trait RequireDowncast {
    /// Requires the value to be present and of type `U`, and returns it.
    ///
    /// Absence fires `require`; a type mismatch fires `require_failure`.
    /// Both are active in every build profile.
    ///
    /// # Example
    ///
    /// ```
    /// use covenant::RequireDowncast;
    /// use std::any::Any;
    ///
    /// let payload: Option<Box<dyn Any>> = Some(Box::new("tag".to_owned()));
    /// let tag: String = payload.require_downcast();
    /// assert_eq!(tag, "tag");
    /// ```
    #[track_caller]
    fn require_downcast<U: 'static>(self) -> U;

    /// Requires presence and type `U`, reporting `message` on either
    /// violation.
    #[track_caller]
    fn require_downcast_msg<U: 'static>(self, message: &str) -> U;
}

impl RequireDowncast for Option<Box<dyn Any>> {
    fn require_downcast<U: 'static>(self) -> U {
        let boxed = self.require();
        match boxed.downcast::<U>() {
            Ok(value) => *value,
            Err(_) => {
                let message = format!(
                    "Failed to cast required value to {}.",
                    std::any::type_name::<U>()
                );
                contract::require_failure(|| message.clone());
                panic!("{message}")
            }
        }
    }

    fn require_downcast_msg<U: 'static>(self, message: &str) -> U {
        let boxed = self.require_msg(message);
        match boxed.downcast::<U>() {
            Ok(value) => *value,
            Err(_) => {
                contract::require_failure(|| message.to_owned());
                panic!("{message}")
            }
        }
    }
}
