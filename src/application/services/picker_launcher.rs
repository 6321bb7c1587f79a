//! Single-flight guard for picker launches.

use std::sync::atomic::{AtomicBool, Ordering};

/// Ensures at most one picker is open at a time.
#[derive(Debug, Default)]
pub struct PickerLauncher {
    active: AtomicBool,
}

impl PickerLauncher {
    /// Creates an inactive launcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    /// Marks the picker active. Returns false if it already was.
    pub fn launch(&self) -> bool {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Marks the picker inactive once its result has been delivered.
    pub fn mark_inactive(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Returns true while a pick is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}
