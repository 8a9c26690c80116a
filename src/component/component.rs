//! # Component abstraction.
//!
//! This module defines the [`Component`] trait: the unit the runtime
//! registers, orders, starts, and stops. The common handle type is
//! [`ComponentRef`], an `Arc<dyn Component>` suitable for sharing across the
//! runtime.
//!
//! Only [`run`](Component::run) and the identity accessors are mandatory.
//! Dependencies and the init/shutdown hooks are default methods, so a minimal
//! component implements three items.

use std::sync::Arc;

use async_trait::async_trait;

use crate::component::{Dependency, Ready};
use crate::core::AppHandle;
use crate::error::ComponentError;

/// Shared handle to a component (`Arc<dyn Component>`).
pub type ComponentRef = Arc<dyn Component>;

/// # A named, versioned unit with a supervised lifecycle.
///
/// The runtime calls the hooks in a fixed order:
///
/// 1. [`dependencies`](Component::dependencies) while resolving the startup
///    order (once per resolution),
/// 2. [`init`](Component::init) sequentially in dependency order, before any
///    run operation starts,
/// 3. [`run`](Component::run) as a supervised background operation,
/// 4. [`shutdown`](Component::shutdown) during teardown, in reverse
///    dependency order.
///
/// ## Rules
/// - [`name`](Component::name) must be stable for the component's lifetime:
///   it is the registry key and the target of dependency edges.
/// - `run` should fire [`Ready::notify`] once the component can serve its
///   dependents, then keep running for as long as the component is alive.
///   Short-lived components simply return.
/// - `run` returning `Ok` marks the component finished; returning `Err` (or
///   panicking) marks it failed. Neither stops the rest of the application.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use muster::{AppHandle, Component, ComponentError, Dependency, Ready};
///
/// struct Mailer;
///
/// #[async_trait]
/// impl Component for Mailer {
///     fn name(&self) -> &str { "mailer" }
///     fn version(&self) -> &str { "1.2.0" }
///
///     fn dependencies(&self) -> Vec<Dependency> {
///         vec![Dependency::required("config")]
///     }
///
///     async fn run(&self, _app: AppHandle, ready: Ready) -> Result<(), ComponentError> {
///         ready.notify();
///         // serve until done...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Component: Send + Sync + 'static {
    /// Returns the stable, human-readable component name.
    fn name(&self) -> &str;

    /// Returns the component version, reported in logs.
    fn version(&self) -> &str;

    /// Declares the components this one needs started before it.
    ///
    /// Defaults to no dependencies. Consulted once per graph resolution.
    fn dependencies(&self) -> Vec<Dependency> {
        Vec::new()
    }

    /// One-time setup, called sequentially in dependency order before any
    /// component runs.
    ///
    /// An error here aborts startup. Defaults to a no-op.
    async fn init(&self, app: AppHandle) -> Result<(), ComponentError> {
        let _ = app;
        Ok(())
    }

    /// The component's main operation, driven as a supervised background
    /// task.
    ///
    /// Fire `ready` once the component is able to serve, then run until the
    /// work is done. Dropping `ready` without notifying is allowed and simply
    /// leaves readiness unsignaled.
    async fn run(&self, app: AppHandle, ready: Ready) -> Result<(), ComponentError>;

    /// Teardown hook, called during shutdown in reverse dependency order.
    ///
    /// Use it to make `run` return: close a channel, cancel a token, flush
    /// state. The entry is marked shut down when this hook returns, even on
    /// error. Defaults to a no-op.
    async fn shutdown(&self) -> Result<(), ComponentError> {
        Ok(())
    }
}
