//! # Closure-backed component (`FnComponent`).
//!
//! [`FnComponent`] assembles a component out of plain closures: a mandatory
//! run closure plus optional dependencies and init/shutdown hooks attached
//! with `with_*` methods. Each invocation of a hook calls the closure again,
//! producing a fresh future that owns its state; shared state goes into an
//! explicit `Arc` captured by the closure.
//!
//! ## Example
//! ```rust
//! use muster::{AppHandle, Component, ComponentError, Dependency, FnComponent, Ready};
//!
//! let worker = FnComponent::new("worker", "0.1.0", |_app: AppHandle, ready: Ready| async move {
//!     ready.notify();
//!     // do work...
//!     Ok::<_, ComponentError>(())
//! })
//! .with_dependency(Dependency::required("config"));
//!
//! assert_eq!(worker.name(), "worker");
//! assert_eq!(worker.dependencies().len(), 1);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::component::{Component, ComponentRef, Dependency, Ready};
use crate::core::AppHandle;
use crate::error::ComponentError;

type RunFn =
    Box<dyn Fn(AppHandle, Ready) -> BoxFuture<'static, Result<(), ComponentError>> + Send + Sync>;
type InitFn =
    Box<dyn Fn(AppHandle) -> BoxFuture<'static, Result<(), ComponentError>> + Send + Sync>;
type ShutdownFn = Box<dyn Fn() -> BoxFuture<'static, Result<(), ComponentError>> + Send + Sync>;

/// Closure-backed component implementation.
///
/// Holds the run closure plus whatever optional pieces were attached. The
/// hooks a caller never sets stay `None` and fall back to the [`Component`]
/// trait defaults (no dependencies, no-op init, no-op shutdown).
pub struct FnComponent {
    name: Cow<'static, str>,
    version: Cow<'static, str>,
    dependencies: Vec<Dependency>,
    init: Option<InitFn>,
    run: RunFn,
    shutdown: Option<ShutdownFn>,
}

impl FnComponent {
    /// Creates a component from a name, a version, and a run closure.
    ///
    /// The closure is called once per start and receives the application
    /// handle plus the one-shot [`Ready`] signal.
    pub fn new<F, Fut>(
        name: impl Into<Cow<'static, str>>,
        version: impl Into<Cow<'static, str>>,
        run: F,
    ) -> Self
    where
        F: Fn(AppHandle, Ready) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ComponentError>> + Send + 'static,
    {
        FnComponent {
            name: name.into(),
            version: version.into(),
            dependencies: Vec::new(),
            init: None,
            run: Box::new(move |app, ready| Box::pin(run(app, ready))),
            shutdown: None,
        }
    }

    /// Adds one startup-ordering edge.
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Adds several startup-ordering edges at once.
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        self.dependencies.extend(dependencies);
        self
    }

    /// Attaches an init hook, run sequentially before any component starts.
    pub fn with_init<F, Fut>(mut self, init: F) -> Self
    where
        F: Fn(AppHandle) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ComponentError>> + Send + 'static,
    {
        self.init = Some(Box::new(move |app| Box::pin(init(app))));
        self
    }

    /// Attaches a shutdown hook, run during teardown in reverse order.
    pub fn with_shutdown<F, Fut>(mut self, shutdown: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ComponentError>> + Send + 'static,
    {
        self.shutdown = Some(Box::new(move || Box::pin(shutdown())));
        self
    }

    /// Returns the component as a shared handle (`Arc<dyn Component>`).
    pub fn arc(self) -> ComponentRef {
        Arc::new(self)
    }
}

#[async_trait]
impl Component for FnComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn dependencies(&self) -> Vec<Dependency> {
        self.dependencies.clone()
    }

    async fn init(&self, app: AppHandle) -> Result<(), ComponentError> {
        match &self.init {
            Some(hook) => hook(app).await,
            None => Ok(()),
        }
    }

    async fn run(&self, app: AppHandle, ready: Ready) -> Result<(), ComponentError> {
        (self.run)(app, ready).await
    }

    async fn shutdown(&self) -> Result<(), ComponentError> {
        match &self.shutdown {
            Some(hook) => hook().await,
            None => Ok(()),
        }
    }
}

impl fmt::Debug for FnComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComponent")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("dependencies", &self.dependencies)
            .field("init", &self.init.is_some())
            .field("shutdown", &self.shutdown.is_some())
            .finish()
    }
}
