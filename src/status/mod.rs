//! Component status: values, atomic storage, and watcher notification.
//!
//! This module groups the lifecycle **data model** and the **signaling**
//! primitives built on top of it.
//!
//! ## Contents
//! - [`Status`] the five lifecycle states a component moves through
//! - [`StatusCell`] lock-free current-status storage with the shutdown rule
//! - [`WatcherTable`], [`StatusWatch`] one-shot wakeups for status arrival
//!
//! ## Quick reference
//! - **Writers**: the run supervisor in `core/entry.rs` (ready, finished,
//!   failed) and the shutdown sweep (forced shutdown).
//! - **Readers**: [`ComponentEntry::status`](crate::ComponentEntry::status)
//!   polls, [`ComponentEntry::watch_status`](crate::ComponentEntry::watch_status)
//!   parks until a target status arrives.

mod cell;
mod status;
mod watch;

pub use status::Status;
pub use watch::StatusWatch;

pub(crate) use cell::StatusCell;
pub(crate) use watch::WatcherTable;
