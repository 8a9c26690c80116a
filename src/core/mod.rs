//! Runtime core: registration, ordering, and lifecycle orchestration.
//!
//! This module contains the embedded implementation of the muster runtime.
//! The public surface is [`App`] (build and run an application), [`AppHandle`]
//! (interact with it from inside components), [`Registry`] and
//! [`ComponentEntry`] (inspect registered components), and [`Config`].
//!
//! ## High-level architecture
//! ```text
//! Build phase:
//!   App::register(component) ──► Registry.add(name → ComponentEntry)
//!                                       └─ invalidates cached order
//!
//! Startup (App::run):
//!   seal registry ─► Registry.all(): Kahn resolution over dependency edges
//!        │                 └─ MissingDependency / Cycle abort here
//!        ├─► init hooks, sequentially in resolved order (error aborts startup)
//!        └─► per entry: spawn run future + supervisor task
//!                            │
//!                  ┌─────────┴──────────┐
//!                  ▼                    ▼
//!            ready signal          run outcome
//!            → Status::Ready       → Finished / RunFailed
//!                  └───────► watchers fire on every arrival
//!
//! Shutdown path:
//!   signal::wait_for_shutdown_signal()
//!             └─► shutdown hooks in reverse resolved order
//!             └─► every entry forced to Status::Shutdown (terminal)
//!             └─► wait for supervisors up to Config::grace:
//!                    ├─ all settled  → Ok
//!                    └─ grace over   → RuntimeError::GraceExceeded (stuck list)
//! ```
//!
//! Internal modules:
//! - [`registry`]: name → entry map plus cached dependency resolution;
//! - [`entry`]: per-component status machine and run supervision;
//! - [`app`]: startup/shutdown orchestration over the registry;
//! - [`handle`]: the capability components get at init/run time;
//! - [`signal`]: cross-platform shutdown signal handling.

mod app;
mod config;
mod entry;
mod handle;
mod registry;
mod signal;

pub use app::App;
pub use config::Config;
pub use entry::ComponentEntry;
pub use handle::AppHandle;
pub use registry::Registry;
