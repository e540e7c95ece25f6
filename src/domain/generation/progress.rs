use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Point-in-time view of a bulk run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub current: usize,
    pub total: usize,
    pub is_processing: bool,
    pub is_paused: bool,
}

/// Lock-free progress read model.
///
/// Written only by the processor that owns it; any number of readers may
/// take a snapshot at any time. The four fields are not updated atomically
/// as a group, so a reader can briefly see `current` ahead of the flags.
#[derive(Debug, Default)]
pub struct ProgressReporter {
    current: AtomicUsize,
    total: AtomicUsize,
    is_processing: AtomicBool,
    is_paused: AtomicBool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ProgressState {
        ProgressState {
            current: self.current.load(Ordering::Acquire),
            total: self.total.load(Ordering::Acquire),
            is_processing: self.is_processing.load(Ordering::Acquire),
            is_paused: self.is_paused.load(Ordering::Acquire),
        }
    }

    pub(crate) fn begin(&self, total: usize) {
        self.total.store(total, Ordering::Release);
        self.current.store(0, Ordering::Release);
        self.is_paused.store(false, Ordering::Release);
        self.is_processing.store(true, Ordering::Release);
    }

    /// Set the number of entities processed so far, clamped to the total
    pub(crate) fn advance_to(&self, current: usize) {
        let total = self.total.load(Ordering::Acquire);
        self.current.store(current.min(total), Ordering::Release);
    }

    /// Stop at a batch boundary; counters stay as they are
    pub(crate) fn suspend(&self) {
        self.is_processing.store(false, Ordering::Release);
        self.is_paused.store(true, Ordering::Release);
    }

    pub(crate) fn resume(&self) {
        self.is_paused.store(false, Ordering::Release);
        self.is_processing.store(true, Ordering::Release);
    }

    /// Clear the processing flag without touching counters or the pause flag
    pub(crate) fn halt(&self) {
        self.is_processing.store(false, Ordering::Release);
    }

    pub(crate) fn reset(&self) {
        self.is_processing.store(false, Ordering::Release);
        self.is_paused.store(false, Ordering::Release);
        self.current.store(0, Ordering::Release);
        self.total.store(0, Ordering::Release);
    }
}
