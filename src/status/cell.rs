//! Atomic storage for the current status of one component.

use std::sync::atomic::{AtomicU8, Ordering};

use super::Status;

/// # Lock-free current-status slot.
///
/// Stores a [`Status`] discriminant in an `AtomicU8`. Concurrent writers are
/// the run supervisor (ready/finished/failed transitions) and the shutdown
/// sweep (forced shutdown); readers are arbitrary threads polling
/// [`ComponentEntry::status`](crate::ComponentEntry::status).
///
/// ## Rules
/// - [`advance`](StatusCell::advance) refuses every write once the slot holds
///   [`Status::Shutdown`]. A run finishing after its component was stopped
///   must not resurrect the entry.
/// - [`force_shutdown`](StatusCell::force_shutdown) wins over any concurrent
///   transition: it swaps unconditionally.
pub(crate) struct StatusCell(AtomicU8);

impl StatusCell {
    pub(crate) fn new() -> Self {
        StatusCell(AtomicU8::new(Status::Unknown as u8))
    }

    /// Returns the status currently stored.
    pub(crate) fn load(&self) -> Status {
        Status::from_raw(self.0.load(Ordering::Acquire))
    }

    /// Attempts to store `next`, returning `false` if the slot already holds
    /// [`Status::Shutdown`].
    ///
    /// The caller must not notify watchers for `next` when this returns
    /// `false`: the transition did not happen.
    pub(crate) fn advance(&self, next: Status) -> bool {
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            if current == Status::Shutdown as u8 {
                return false;
            }
            match self.0.compare_exchange_weak(
                current,
                next as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
    }

    /// Stores [`Status::Shutdown`] unconditionally, returning the status that
    /// was displaced.
    pub(crate) fn force_shutdown(&self) -> Status {
        Status::from_raw(self.0.swap(Status::Shutdown as u8, Ordering::AcqRel))
    }
}
