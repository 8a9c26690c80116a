//! Error types used by the muster runtime and components.
//!
//! This module defines three error enums:
//!
//! - [`ResolveError`] — errors raised while resolving the component dependency graph.
//! - [`ComponentError`] — errors raised by an individual component's hooks or run operation.
//! - [`RuntimeError`] — errors raised by the orchestration runtime itself.
//!
//! All types provide an `as_label` helper returning a short stable snake_case
//! name for use in logs.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by dependency graph resolution.
///
/// Resolution either succeeds with a total startup order or fails with one of
/// these. Both variants name the offending components, so the failure can be
/// reported without replaying the resolution.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A component declared a required dependency that is not registered.
    #[error("component {component} has required dependency {dependency}")]
    MissingDependency {
        /// Name of the component declaring the edge.
        component: String,
        /// Name of the dependency that is absent from the registry.
        dependency: String,
    },

    /// The dependency graph contains a cycle: no valid startup order exists.
    #[error("circular dependency between components: {}", .components.join(", "))]
    Cycle {
        /// Components participating in (or downstream of) the cycle, sorted by name.
        components: Vec<String>,
    },
}

impl ResolveError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use muster::ResolveError;
    ///
    /// let err = ResolveError::MissingDependency {
    ///     component: "mailer".into(),
    ///     dependency: "smtp".into(),
    /// };
    /// assert_eq!(err.as_label(), "resolve_missing_dependency");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ResolveError::MissingDependency { .. } => "resolve_missing_dependency",
            ResolveError::Cycle { .. } => "resolve_cycle",
        }
    }
}

/// # Errors produced by component execution.
///
/// Returned by a component's `init`, `run`, or `shutdown` hooks. A failing run
/// is recorded on the component's entry and can be retrieved later via
/// [`ComponentEntry::run_error`](crate::ComponentEntry::run_error).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// The hook or run operation returned an error.
    #[error("{message}")]
    Failed {
        /// The underlying error message.
        message: String,
    },

    /// The run operation or a hook panicked; the panic was caught at its
    /// task boundary.
    #[error("panicked: {message}")]
    Panicked {
        /// The panic payload, rendered as text.
        message: String,
    },
}

impl ComponentError {
    /// Builds a [`ComponentError::Failed`] from any displayable message.
    ///
    /// # Example
    /// ```
    /// use muster::ComponentError;
    ///
    /// let err = ComponentError::failed("listener socket closed");
    /// assert_eq!(err.to_string(), "listener socket closed");
    /// ```
    pub fn failed(message: impl Into<String>) -> Self {
        ComponentError::Failed {
            message: message.into(),
        }
    }

    pub(crate) fn panicked(message: impl Into<String>) -> Self {
        ComponentError::Panicked {
            message: message.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ComponentError::Failed { .. } => "component_failed",
            ComponentError::Panicked { .. } => "component_panicked",
        }
    }

    /// Returns the underlying message without the variant prefix.
    pub fn as_message(&self) -> &str {
        match self {
            ComponentError::Failed { message } => message,
            ComponentError::Panicked { message } => message,
        }
    }
}

/// Lets component hooks bubble runtime failures (such as
/// [`AppHandle::ready_component`](crate::AppHandle::ready_component) on an
/// unknown name) with `?`.
impl From<RuntimeError> for ComponentError {
    fn from(err: RuntimeError) -> Self {
        ComponentError::failed(err.to_string())
    }
}

/// # Errors produced by the muster runtime.
///
/// These represent failures of the orchestration system itself: a graph that
/// cannot be resolved, an init hook aborting startup, or a shutdown sequence
/// exceeding its grace period.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The component graph could not be resolved into a startup order.
    #[error("dependency resolution failed: {source}")]
    Resolve {
        /// The underlying resolution failure.
        #[from]
        source: ResolveError,
    },

    /// A component's init hook failed; startup was aborted.
    #[error("component {component} failed to initialize: {source}")]
    Init {
        /// Name of the component whose init hook failed.
        component: String,
        /// The error returned by the hook.
        source: ComponentError,
    },

    /// A component was registered after startup sealed the component set.
    #[error("component {component} registered after startup; the component set is sealed")]
    Sealed {
        /// Name of the rejected component.
        component: String,
    },

    /// The application's run loop was entered a second time.
    #[error("application is already running")]
    AlreadyRunning,

    /// A lookup referenced a component that was never registered.
    #[error("unknown component {component}")]
    UnknownComponent {
        /// The requested component name.
        component: String,
    },

    /// Shutdown grace period was exceeded; some components never settled.
    #[error("shutdown grace {grace:?} exceeded; stuck: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of components whose run operations did not finish in time.
        stuck: Vec<String>,
    },

    /// OS signal handlers could not be installed.
    #[error("failed to install signal handlers: {source}")]
    Signal {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use muster::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), stuck: vec![] };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Resolve { .. } => "runtime_resolve_failed",
            RuntimeError::Init { .. } => "runtime_init_failed",
            RuntimeError::Sealed { .. } => "runtime_sealed",
            RuntimeError::AlreadyRunning => "runtime_already_running",
            RuntimeError::UnknownComponent { .. } => "runtime_unknown_component",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
            RuntimeError::Signal { .. } => "runtime_signal",
        }
    }
}
