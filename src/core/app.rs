//! # App: dependency-ordered startup, supervision, and graceful shutdown.
//!
//! The [`App`] owns the [`Registry`], the global [`Config`], and the task
//! tracker counting outstanding run operations. [`App::run`] drives the
//! whole lifecycle: resolve the graph, init components in order, supervise
//! their runs, and tear everything down on a termination signal.
//!
//! ## Key responsibilities
//! - seal the component set at startup (late registrations are rejected)
//! - run init hooks sequentially in resolved order, aborting on error
//! - start every run operation without blocking on any of them
//! - on OS signal, call shutdown hooks in reverse order and wait for runs
//!   to settle within [`Config::grace`]
//!
//! ## Example
//! ```rust
//! use muster::{App, Config, Dependency, FnComponent};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = App::new(Config::default());
//!
//!     app.register(
//!         FnComponent::new("config", "1.0.0", |_app, ready| async move {
//!             ready.notify();
//!             Ok(())
//!         })
//!         .arc(),
//!     )?;
//!
//!     app.register(
//!         FnComponent::new("db", "1.0.0", |app, ready| async move {
//!             app.ready_component("config").await?;
//!             ready.notify();
//!             Ok(())
//!         })
//!         .with_dependency(Dependency::required("config"))
//!         .arc(),
//!     )?;
//!
//!     // Both runs terminate, so this returns without waiting for a signal.
//!     app.run().await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::component::ComponentRef;
use crate::core::config::Config;
use crate::core::entry::ComponentEntry;
use crate::core::handle::AppHandle;
use crate::core::registry::Registry;
use crate::core::signal;
use crate::error::RuntimeError;

/// State shared between an [`App`] and every [`AppHandle`] cloned from it.
pub(crate) struct Shared {
    pub(crate) config: Config,
    pub(crate) registry: Registry,
    pub(crate) tracker: TaskTracker,
}

/// # Orchestrates the component lifecycle.
///
/// Register components, then call [`run`](App::run) exactly once. The app
/// resolves the dependency graph, initializes components in order, drives
/// their run operations in the background, and shuts everything down in
/// reverse order when a termination signal arrives.
pub struct App {
    shared: Arc<Shared>,
}

impl App {
    /// Creates an app with an empty registry.
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, Registry::new())
    }

    /// Creates an app around an existing registry.
    ///
    /// Running the app seals the given registry, clones included.
    pub fn with_registry(config: Config, registry: Registry) -> Self {
        App {
            shared: Arc::new(Shared {
                config,
                registry,
                tracker: TaskTracker::new(),
            }),
        }
    }

    /// Returns the app's registry.
    ///
    /// Stays usable for lookups after startup; additions fail with
    /// [`RuntimeError::Sealed`] once [`run`](App::run) has sealed the
    /// component set.
    pub fn registry(&self) -> &Registry {
        &self.shared.registry
    }

    /// Returns a handle usable from inside components or other tasks.
    pub fn handle(&self) -> AppHandle {
        AppHandle::new(Arc::clone(&self.shared))
    }

    /// Registers a component, failing once [`run`](App::run) has sealed the
    /// component set.
    pub fn register(&self, component: ComponentRef) -> Result<(), RuntimeError> {
        self.shared.registry.add(component)
    }

    /// Runs the application until either:
    /// - every component's run operation settles on its own, or
    /// - a termination signal arrives → reverse-order shutdown (which may
    ///   end with [`RuntimeError::GraceExceeded`]).
    ///
    /// Seals the component set first; an app runs at most once.
    pub async fn run(&self) -> Result<(), RuntimeError> {
        if !self.shared.registry.seal() {
            return Err(RuntimeError::AlreadyRunning);
        }

        let entries = self.boot().await?;
        let handle = self.handle();
        for entry in &entries {
            entry.run(&handle);
        }
        self.supervise(&entries).await
    }

    /// Runs every shutdown hook in reverse resolved order.
    ///
    /// Normally driven by [`run`](App::run) on a termination signal; exposed
    /// for embedders that manage their own signals. Does nothing when the
    /// graph was never resolvable.
    pub async fn shutdown(&self) {
        if let Ok(entries) = self.shared.registry.all() {
            shutdown_sweep(&entries).await;
        }
    }

    /// Resolves the startup order and runs init hooks sequentially.
    async fn boot(&self) -> Result<Vec<Arc<ComponentEntry>>, RuntimeError> {
        let entries = self.shared.registry.all()?;
        info!(components = entries.len(), "Starting application.");

        let handle = self.handle();
        for entry in &entries {
            debug!(
                component = entry.name(),
                version = entry.version(),
                "Initializing component."
            );
            entry
                .component()
                .init(handle.clone())
                .await
                .map_err(|source| RuntimeError::Init {
                    component: entry.name().to_string(),
                    source,
                })?;
        }
        Ok(entries)
    }

    /// Waits until all runs settle or a shutdown signal arrives.
    async fn supervise(&self, entries: &[Arc<ComponentEntry>]) -> Result<(), RuntimeError> {
        let tracker = &self.shared.tracker;
        tracker.close();

        tokio::select! {
            _ = tracker.wait() => {
                info!("All components settled.");
                Ok(())
            }
            result = signal::wait_for_shutdown_signal() => {
                result.map_err(|source| RuntimeError::Signal { source })?;
                info!("Shutdown signal received.");
                shutdown_sweep(entries).await;
                self.settle_with_grace(entries).await
            }
        }
    }

    /// Waits for outstanding runs to settle within the configured grace.
    async fn settle_with_grace(&self, entries: &[Arc<ComponentEntry>]) -> Result<(), RuntimeError> {
        let tracker = &self.shared.tracker;
        match self.shared.config.grace_limit() {
            None => {
                tracker.wait().await;
                Ok(())
            }
            Some(grace) => match tokio::time::timeout(grace, tracker.wait()).await {
                Ok(()) => Ok(()),
                Err(_) => {
                    let stuck = stuck_components(entries);
                    warn!(?grace, ?stuck, "Shutdown grace exceeded.");
                    Err(RuntimeError::GraceExceeded { grace, stuck })
                }
            },
        }
    }
}

/// Calls shutdown hooks in reverse startup order, forcing every entry into
/// its terminal status.
async fn shutdown_sweep(entries: &[Arc<ComponentEntry>]) {
    info!(
        components = entries.len(),
        "Shutting down components in reverse order."
    );
    for entry in entries.iter().rev() {
        if let Err(err) = entry.shutdown().await {
            warn!(component = entry.name(), error = %err, "Shutdown hook failed.");
        }
    }
}

/// Names the components whose run operations started but never settled.
fn stuck_components(entries: &[Arc<ComponentEntry>]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| entry.is_started() && !entry.is_settled())
        .map(|entry| entry.name().to_string())
        .collect()
}
