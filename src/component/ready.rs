//! # Readiness signal.
//!
//! Each run operation receives a [`Ready`] handle. Firing it moves the
//! component to [`Status::Ready`](crate::Status) and wakes everything parked
//! on that status, typically dependents blocked in
//! [`AppHandle::ready_component`](crate::AppHandle::ready_component).

use tokio::sync::oneshot;

/// # One-shot readiness signal handed to a component's run operation.
///
/// ## Rules
/// - [`notify`](Ready::notify) consumes the handle: readiness can be
///   signaled at most once.
/// - Dropping the handle without notifying is allowed. The component then
///   never reports ready; waiters are released only when the run completes
///   (a finished run implies readiness) or the component shuts down.
#[derive(Debug)]
pub struct Ready {
    tx: oneshot::Sender<()>,
}

impl Ready {
    pub(crate) fn new(tx: oneshot::Sender<()>) -> Self {
        Ready { tx }
    }

    /// Marks the component as ready to serve its dependents.
    pub fn notify(self) {
        let _ = self.tx.send(());
    }
}
