//! Component abstraction: trait, dependency edges, readiness signal.
//!
//! This module defines what a component **is**; the `core` module decides how
//! registered components are ordered, started, and stopped.
//!
//! ## Contents
//! - [`Component`], [`ComponentRef`] the async trait and its shared handle
//! - [`Dependency`] a named startup-ordering edge, required or optional
//! - [`Ready`] the one-shot signal a run operation fires when it is up
//! - [`FnComponent`] closure-backed implementation for components that do not
//!   warrant a dedicated type

mod component;
mod dependency;
mod func;
mod ready;

pub use component::{Component, ComponentRef};
pub use dependency::Dependency;
pub use func::FnComponent;
pub use ready::Ready;
