//! Write-through intensity synchronization for mixed-runtime hosts.
//!
//! A process that embeds a second assertion runtime alongside this crate
//! (a C or C++ library with its own level variable, say) has two copies of
//! the intensity level. This module keeps them numerically equal by routing
//! every write through [`set_bridged_intensity_level`], which stores the
//! level here and then hands the same value to a registered foreign setter.
//!
//! Synchronization is write-through only. Reads return this crate's level;
//! nothing re-reads or reconciles the foreign side, so a host that writes
//! the foreign level directly walks the two copies apart until the next
//! bridged write.

use std::sync::{PoisonError, RwLock};

use crate::intensity;

/// Signature of a foreign runtime's intensity setter.
pub type ForeignIntensitySetter = fn(i64);

static FOREIGN_SETTER: RwLock<Option<ForeignIntensitySetter>> = RwLock::new(None);

/// Registers the foreign runtime's setter, returning the previous one.
///
/// Only one setter is held at a time. The setter runs inside every bridged
/// write, on the writing thread; keep it as cheap as a store.
pub fn register_foreign_intensity_setter(
    setter: ForeignIntensitySetter,
) -> Option<ForeignIntensitySetter> {
    let mut slot = FOREIGN_SETTER.write().unwrap_or_else(PoisonError::into_inner);
    slot.replace(setter)
}

/// Removes the registered foreign setter, returning it.
pub fn clear_foreign_intensity_setter() -> Option<ForeignIntensitySetter> {
    let mut slot = FOREIGN_SETTER.write().unwrap_or_else(PoisonError::into_inner);
    slot.take()
}

/// Sets the process-wide intensity level and fans the write out to the
/// registered foreign setter.
///
/// The local store happens in every build profile. The foreign runtimes
/// this bridge exists for only grade their assertions in debug builds, so
/// the fan-out is skipped in release builds.
pub fn set_bridged_intensity_level(level: i64) {
    intensity::set_intensity_level(level);
    if cfg!(debug_assertions) {
        let setter = *FOREIGN_SETTER.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(setter) = setter {
            setter(level);
        }
    }
}

/// Returns the process-wide intensity level.
///
/// The bridge stores no copy of its own; this is [`crate::intensity_level`]
/// under the bridged name.
pub fn bridged_intensity_level() -> i64 {
    intensity::intensity_level()
}
