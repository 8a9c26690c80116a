//! # Application handle.
//!
//! The [`AppHandle`] is the capability a component receives in its `init`
//! and `run` hooks: look other components up, inspect the resolved order,
//! and wait for a dependency to report ready. It deliberately cannot
//! register components; the component set belongs to [`App`](crate::App)
//! and is sealed at startup.

use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::trace;

use crate::core::app::Shared;
use crate::core::entry::ComponentEntry;
use crate::error::{ResolveError, RuntimeError};
use crate::status::Status;

/// # Cloneable handle into a running (or booting) application.
///
/// Obtained from [`App::handle`](crate::App::handle) or received by
/// component hooks. Clones share the same application state.
#[derive(Clone)]
pub struct AppHandle {
    shared: Arc<Shared>,
}

impl AppHandle {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        AppHandle { shared }
    }

    /// Returns the entry registered under `name`, if any.
    pub fn get_component(&self, name: &str) -> Option<Arc<ComponentEntry>> {
        self.shared.registry.get(name)
    }

    /// Returns `true` if a component is registered under `name`.
    pub fn has_component(&self, name: &str) -> bool {
        self.shared.registry.contains(name)
    }

    /// Returns every entry in resolved startup order.
    pub fn components(&self) -> Result<Vec<Arc<ComponentEntry>>, ResolveError> {
        self.shared.registry.all()
    }

    /// Waits until the named component reports ready.
    ///
    /// Resolves once the component reaches [`Status::Ready`] (or finishes,
    /// which implies it). Fails fast with
    /// [`RuntimeError::UnknownComponent`] when no such component is
    /// registered. A component that fails without ever signaling readiness
    /// never releases the waiter; combine with a timeout when that matters.
    ///
    /// # Example
    /// ```
    /// use muster::{AppHandle, Component, ComponentError, FnComponent, Ready};
    ///
    /// let api = FnComponent::new("api", "1.0.0", |app: AppHandle, ready: Ready| async move {
    ///     app.ready_component("db").await?;
    ///     ready.notify();
    ///     Ok::<_, ComponentError>(())
    /// });
    /// assert_eq!(api.name(), "api");
    /// ```
    pub async fn ready_component(&self, name: &str) -> Result<(), RuntimeError> {
        loop {
            let entry =
                self.get_component(name)
                    .ok_or_else(|| RuntimeError::UnknownComponent {
                        component: name.to_string(),
                    })?;
            if entry.watch_status(Status::Ready).wait().await {
                return Ok(());
            }
            // The entry was replaced while we waited; watch the current one.
            trace!(component = name, "Readiness watch discarded, retrying.");
        }
    }

    pub(crate) fn tracker(&self) -> &TaskTracker {
        &self.shared.tracker
    }
}
