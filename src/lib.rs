//! # muster
//!
//! **Muster** is a lightweight component orchestration library for Rust.
//!
//! It wires an application together out of named, versioned components:
//! dependencies are declared as edges, startup order is resolved from the
//! graph, every run operation is supervised in the background, and shutdown
//! walks the order in reverse. The crate is designed as the boot layer of a
//! long-running service, not as a job scheduler.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!   │  Component   │   │  Component   │   │  Component   │
//!   │   "config"   │   │    "db"      │   │    "api"     │
//!   └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!          ▼ register         ▼ register         ▼ register
//! ┌─────────────────────────────────────────────────────────────┐
//! │  App                                                        │
//! │  - Registry   (name → ComponentEntry, cached order)         │
//! │  - Config     (teardown grace)                              │
//! │  - TaskTracker (counts outstanding run operations)          │
//! └──────┬──────────────────┬──────────────────┬────────────────┘
//!        ▼                  ▼                  ▼
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ComponentEntry│   │ComponentEntry│   │ComponentEntry│
//! │ status cell  │   │ status cell  │   │ status cell  │
//! │ watchers     │   │ watchers     │   │ watchers     │
//! └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!        │ supervised run   │                  │
//!        ▼                  ▼                  ▼
//!   Ready / Finished / RunFailed  ──► watchers fire, dependents
//!                                     blocked in ready_component resume
//! ```
//!
//! ### Lifecycle
//! ```text
//! App::run()
//!   ├─► seal registry (register() now fails)
//!   ├─► Registry::all(): Kahn resolution, waves in lexicographic order
//!   │       └─ MissingDependency / Cycle ─► abort with RuntimeError
//!   ├─► for each entry, in order: component.init(handle)
//!   │       └─ Err ─► abort startup (RuntimeError::Init)
//!   ├─► for each entry, in order: spawn run + supervisor (non-blocking)
//!   │       ├─ ready signal       ─► Status::Ready
//!   │       ├─ run returns Ok     ─► Status::Finished  (implies Ready)
//!   │       ├─ run returns Err    ─► Status::RunFailed (error recorded)
//!   │       └─ run panics         ─► Status::RunFailed (Panicked recorded)
//!   └─► wait:
//!         ├─ every run settles    ─► Ok(())
//!         └─ termination signal   ─► shutdown hooks in reverse order,
//!                                    every entry forced to Status::Shutdown,
//!                                    wait up to Config::grace
//!                                      └─ exceeded ─► GraceExceeded{stuck}
//! ```
//!
//! ## Features
//! | Area              | Description                                                         | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------------|---------------------------------------------|
//! | **Components**    | Define units as trait impls or closures, with optional hooks.       | [`Component`], [`ComponentRef`], [`FnComponent`] |
//! | **Dependencies**  | Declare required/optional edges; order is resolved for you.         | [`Dependency`], [`Registry`]                |
//! | **Status**        | Poll or await each component's lifecycle state.                     | [`Status`], [`StatusWatch`], [`ComponentEntry`] |
//! | **Orchestration** | Dependency-ordered init, supervised runs, reverse-order shutdown.   | [`App`], [`AppHandle`]                      |
//! | **Errors**        | Typed errors for resolution, components, and the runtime.           | [`ResolveError`], [`ComponentError`], [`RuntimeError`] |
//! | **Configuration** | Teardown grace with sentinel semantics.                             | [`Config`]                                  |
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
//!     // Starts after "config", and blocks its own readiness on it.
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
//!     // Returns once both runs settle; long-lived apps instead park here
//!     // until a termination signal drives the reverse-order shutdown.
//!     app.run().await?;
//!     Ok(())
//! }
//! ```

mod component;
mod core;
mod error;
mod status;

// ---- Public re-exports ----

pub use crate::component::{Component, ComponentRef, Dependency, FnComponent, Ready};
pub use crate::core::{App, AppHandle, ComponentEntry, Config, Registry};
pub use crate::error::{ComponentError, ResolveError, RuntimeError};
pub use crate::status::{Status, StatusWatch};
