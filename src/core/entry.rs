//! # Component entry: status machine and run supervision.
//!
//! A [`ComponentEntry`] wraps one registered component with everything the
//! runtime tracks about it: its place in the startup order, its current
//! [`Status`], the error of a failed run, and the watchers parked on future
//! statuses.
//!
//! ## Supervision
//! ```text
//! entry.run(handle)
//!   ├─ tokio::spawn(component.run(app, ready))          (the run future)
//!   └─ tracker.spawn(supervisor):
//!         select! {
//!             outcome = join    → settle(outcome)        Finished / RunFailed
//!             signal  = ready   → Status::Ready, then settle(join.await)
//!         }
//! ```
//!
//! ## Rules
//! - `run` is non-blocking: it spawns and returns, so startup never waits
//!   for a component to finish.
//! - A panic in the run future is caught at the join boundary and recorded
//!   as [`ComponentError::Panicked`]; the entry moves to
//!   [`Status::RunFailed`] like any other failed run.
//! - [`Status::Shutdown`] is forced and terminal, even when the shutdown
//!   hook fails or panics: transitions reported by a run that outlives its
//!   shutdown are discarded.
//! - The run error is stored before the status moves to `RunFailed`, so an
//!   observer woken by the transition always finds the error in place.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tokio::task::JoinError;
use tracing::{debug, trace, warn};

use crate::component::{ComponentRef, Ready};
use crate::core::AppHandle;
use crate::error::ComponentError;
use crate::status::{Status, StatusCell, StatusWatch, WatcherTable};

const ORDER_UNSET: usize = usize::MAX;

/// # A registered component plus its runtime state.
///
/// Entries are created by [`Registry::add`](crate::Registry::add) and live
/// for as long as their registry slot: replacing a component discards the
/// old entry along with its parked watchers.
pub struct ComponentEntry {
    component: ComponentRef,
    /// Position in the resolved startup order; `ORDER_UNSET` until placed.
    order: AtomicUsize,
    status: StatusCell,
    run_error: Mutex<Option<ComponentError>>,
    watchers: WatcherTable,
    started: AtomicBool,
    settled: AtomicBool,
}

impl ComponentEntry {
    pub(crate) fn new(component: ComponentRef) -> Self {
        ComponentEntry {
            component,
            order: AtomicUsize::new(ORDER_UNSET),
            status: StatusCell::new(),
            run_error: Mutex::new(None),
            watchers: WatcherTable::new(),
            started: AtomicBool::new(false),
            settled: AtomicBool::new(false),
        }
    }

    /// Returns the component's name.
    pub fn name(&self) -> &str {
        self.component.name()
    }

    /// Returns the component's version.
    pub fn version(&self) -> &str {
        self.component.version()
    }

    /// Returns the wrapped component.
    pub fn component(&self) -> &ComponentRef {
        &self.component
    }

    /// Returns the entry's position in the resolved startup order, or `None`
    /// before the first successful resolution.
    pub fn order(&self) -> Option<usize> {
        match self.order.load(Ordering::Acquire) {
            ORDER_UNSET => None,
            order => Some(order),
        }
    }

    /// Returns the component's current lifecycle status.
    pub fn status(&self) -> Status {
        self.status.load()
    }

    /// Returns the error of a failed run, if the run has failed.
    ///
    /// Present from the moment the entry reaches [`Status::RunFailed`].
    pub fn run_error(&self) -> Option<ComponentError> {
        self.run_error.lock().unwrap().clone()
    }

    /// Registers a one-shot watcher that resolves when this component
    /// reaches `target`.
    ///
    /// Fires immediately when the current status already satisfies the
    /// target; see [`Status::satisfies`] for the `Finished` implications.
    pub fn watch_status(&self, target: Status) -> StatusWatch {
        self.watchers.watch(&self.status, target)
    }

    pub(crate) fn set_order(&self, order: usize) {
        self.order.store(order, Ordering::Release);
    }

    pub(crate) fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.settled.load(Ordering::Acquire)
    }

    /// Spawns the component's run future and the supervisor tracking it.
    ///
    /// The supervisor is spawned on the application's task tracker, so
    /// [`App::run`](crate::App::run) can wait for every outcome to be
    /// recorded. Calling this twice is a no-op.
    pub(crate) fn run(self: &Arc<Self>, handle: &AppHandle) {
        if self.started.swap(true, Ordering::AcqRel) {
            return;
        }

        let (ready_tx, ready_rx) = oneshot::channel();
        let component = Arc::clone(&self.component);
        let app = handle.clone();
        let mut join =
            tokio::spawn(async move { component.run(app, Ready::new(ready_tx)).await });

        let entry = Arc::clone(self);
        handle.tracker().spawn(async move {
            tokio::select! {
                outcome = &mut join => entry.settle(outcome),
                signal = ready_rx => {
                    if signal.is_ok() {
                        entry.transition(Status::Ready);
                    }
                    entry.settle(join.await);
                }
            }
        });
    }

    /// Runs the component's shutdown hook, then forces the entry into
    /// [`Status::Shutdown`].
    ///
    /// The hook runs at its own join boundary, so the status is forced even
    /// when the hook fails or panics. A panicking hook comes back to the
    /// caller as [`ComponentError::Panicked`], like a panicking run.
    pub(crate) async fn shutdown(&self) -> Result<(), ComponentError> {
        debug!(component = self.name(), "Shutting down component.");
        let component = Arc::clone(&self.component);
        let hook = tokio::spawn(async move { component.shutdown().await });
        let result = match hook.await {
            Ok(result) => result,
            Err(join_err) => Err(ComponentError::panicked(panic_message(join_err))),
        };

        let prior = self.status.force_shutdown();
        if prior != Status::Shutdown {
            self.watchers.fire(Status::Shutdown);
        }
        result
    }

    /// Records the outcome of a completed run future.
    fn settle(&self, outcome: Result<Result<(), ComponentError>, JoinError>) {
        match outcome {
            Ok(Ok(())) => {
                debug!(component = self.name(), "Run finished.");
                self.transition(Status::Finished);
            }
            Ok(Err(err)) => {
                warn!(component = self.name(), error = %err, "Run failed.");
                *self.run_error.lock().unwrap() = Some(err);
                self.transition(Status::RunFailed);
            }
            Err(join_err) => {
                let err = ComponentError::panicked(panic_message(join_err));
                warn!(component = self.name(), error = %err, "Run panicked.");
                *self.run_error.lock().unwrap() = Some(err);
                self.transition(Status::RunFailed);
            }
        }
        self.settled.store(true, Ordering::Release);
    }

    /// Stores `next` and wakes its watchers, unless the entry is already
    /// shut down.
    ///
    /// A run that finishes counts as having been ready, so reaching
    /// [`Status::Finished`] also releases watchers parked on
    /// [`Status::Ready`].
    fn transition(&self, next: Status) {
        if !self.status.advance(next) {
            trace!(
                component = self.name(),
                status = next.as_str(),
                "Transition discarded after shutdown."
            );
            return;
        }

        trace!(component = self.name(), status = next.as_str(), "Status changed.");
        self.watchers.fire(next);
        if next == Status::Finished {
            self.watchers.fire(Status::Ready);
        }
    }
}

impl fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentEntry")
            .field("component", &self.name())
            .field("version", &self.version())
            .field("order", &self.order())
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// Renders a join error's panic payload as text.
fn panic_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => {
            if let Some(message) = payload.downcast_ref::<&'static str>() {
                (*message).to_string()
            } else if let Some(message) = payload.downcast_ref::<String>() {
                message.clone()
            } else {
                "opaque panic payload".to_string()
            }
        }
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use tokio::sync::Notify;

    use crate::component::FnComponent;
    use crate::core::{App, Config};

    fn handle() -> AppHandle {
        App::new(Config::default()).handle()
    }

    fn entry_for(component: ComponentRef) -> Arc<ComponentEntry> {
        Arc::new(ComponentEntry::new(component))
    }

    async fn wait_settled(entry: &Arc<ComponentEntry>) {
        for _ in 0..500 {
            if entry.is_settled() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("entry never settled");
    }

    #[tokio::test]
    async fn test_successful_run_reaches_finished() {
        let entry = entry_for(
            FnComponent::new("worker", "0.1.0", |_app, ready| async move {
                ready.notify();
                Ok(())
            })
            .arc(),
        );

        entry.run(&handle());
        assert!(entry.watch_status(Status::Finished).wait().await);
        assert_eq!(entry.status(), Status::Finished);
        assert!(entry.run_error().is_none());
    }

    #[tokio::test]
    async fn test_ready_reported_while_still_running() {
        let gate = Arc::new(Notify::new());
        let release = Arc::clone(&gate);

        let entry = entry_for(
            FnComponent::new("server", "0.1.0", move |_app, ready| {
                let gate = Arc::clone(&gate);
                async move {
                    ready.notify();
                    gate.notified().await;
                    Ok(())
                }
            })
            .arc(),
        );

        entry.run(&handle());
        assert!(entry.watch_status(Status::Ready).wait().await);
        assert_eq!(entry.status(), Status::Ready);
        assert!(!entry.is_settled());

        release.notify_one();
        assert!(entry.watch_status(Status::Finished).wait().await);
        assert_eq!(entry.status(), Status::Finished);
    }

    #[tokio::test]
    async fn test_run_error_reaches_run_failed_with_error_stored() {
        let entry = entry_for(
            FnComponent::new("flaky", "0.1.0", |_app, _ready| async {
                Err(ComponentError::failed("socket closed"))
            })
            .arc(),
        );

        entry.run(&handle());
        assert!(entry.watch_status(Status::RunFailed).wait().await);
        assert_eq!(entry.status(), Status::RunFailed);
        let err = entry.run_error().unwrap();
        assert_eq!(err.as_message(), "socket closed");
    }

    #[tokio::test]
    async fn test_run_panic_is_caught_and_recorded() {
        let entry = entry_for(
            FnComponent::new("crasher", "0.1.0", |_app, _ready| async {
                panic!("kaboom");
            })
            .arc(),
        );

        entry.run(&handle());
        assert!(entry.watch_status(Status::RunFailed).wait().await);
        let err = entry.run_error().unwrap();
        assert_eq!(err.as_label(), "component_panicked");
        assert!(err.as_message().contains("kaboom"));
    }

    #[tokio::test]
    async fn test_shutdown_is_terminal_against_late_completion() {
        let gate = Arc::new(Notify::new());
        let release = Arc::clone(&gate);

        let entry = entry_for(
            FnComponent::new("straggler", "0.1.0", move |_app, ready| {
                let gate = Arc::clone(&gate);
                async move {
                    gate.notified().await;
                    ready.notify();
                    Ok(())
                }
            })
            .arc(),
        );

        entry.run(&handle());
        entry.shutdown().await.unwrap();
        assert_eq!(entry.status(), Status::Shutdown);

        // The run completes afterwards; none of its transitions land.
        release.notify_one();
        wait_settled(&entry).await;
        assert_eq!(entry.status(), Status::Shutdown);
    }

    #[tokio::test]
    async fn test_parked_shutdown_watcher_waits_for_actual_shutdown() {
        use futures::FutureExt;

        let entry = entry_for(
            FnComponent::new("oneshot", "0.1.0", |_app, _ready| async { Ok(()) }).arc(),
        );

        let parked = entry.watch_status(Status::Shutdown);
        let mut parked_wait = Box::pin(parked.wait());

        entry.run(&handle());
        assert!(entry.watch_status(Status::Finished).wait().await);
        // Finishing does not fire watchers parked on Shutdown.
        assert!(parked_wait.as_mut().now_or_never().is_none());

        entry.shutdown().await.unwrap();
        assert!(parked_wait.await);

        // A watcher arriving after the fact resolves immediately.
        assert!(entry.watch_status(Status::Shutdown).wait().await);
    }

    #[tokio::test]
    async fn test_shutdown_hook_error_still_forces_shutdown() {
        let entry = entry_for(
            FnComponent::new("db", "0.1.0", |_app, _ready| async { Ok(()) })
                .with_shutdown(|| async { Err(ComponentError::failed("flush failed")) })
                .arc(),
        );

        let err = entry.shutdown().await.unwrap_err();
        assert_eq!(err.as_message(), "flush failed");
        assert_eq!(entry.status(), Status::Shutdown);
    }

    #[tokio::test]
    async fn test_shutdown_hook_panic_still_forces_shutdown() {
        let entry = entry_for(
            FnComponent::new("bomb", "0.1.0", |_app, _ready| async { Ok(()) })
                .with_shutdown(|| async { panic!("hook detonated") })
                .arc(),
        );

        let parked = entry.watch_status(Status::Shutdown);
        let err = entry.shutdown().await.unwrap_err();
        assert_eq!(err.as_label(), "component_panicked");
        assert!(err.as_message().contains("hook detonated"));
        assert_eq!(entry.status(), Status::Shutdown);
        assert!(parked.wait().await);
    }

    #[tokio::test]
    async fn test_finished_satisfies_ready_watchers() {
        let entry = entry_for(
            FnComponent::new("batch", "0.1.0", |_app, _ready| async { Ok(()) }).arc(),
        );

        let ready_watch = entry.watch_status(Status::Ready);
        entry.run(&handle());

        // The run never notifies readiness, but finishing implies it.
        assert!(ready_watch.wait().await);
        assert_eq!(entry.status(), Status::Finished);
        assert!(entry.watch_status(Status::Ready).wait().await);
    }

    #[tokio::test]
    async fn test_run_is_started_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let entry = entry_for(
            FnComponent::new("singleton", "0.1.0", move |_app, _ready| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .arc(),
        );

        let handle = handle();
        entry.run(&handle);
        entry.run(&handle);
        wait_settled(&entry).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_order_unset_until_placed() {
        let entry = entry_for(
            FnComponent::new("worker", "0.1.0", |_app, _ready| async { Ok(()) }).arc(),
        );
        assert_eq!(entry.order(), None);
        entry.set_order(3);
        assert_eq!(entry.order(), Some(3));
    }

    #[test]
    fn test_debug_render_reports_identity_and_status() {
        let entry = entry_for(
            FnComponent::new("worker", "0.1.0", |_app, _ready| async { Ok(()) }).arc(),
        );
        let rendered = format!("{entry:?}");
        assert!(rendered.contains("worker"));
        assert!(rendered.contains("Unknown"));
    }
}
