//! # Runtime configuration.
//!
//! Provides [`Config`], the settings [`App`](crate::App) is built with.
//!
//! ## Sentinel values
//! - `grace = 0s` → no deadline: signal-driven teardown waits for every run
//!   to settle, however long that takes.

use std::time::Duration;

/// Configuration for the application runtime.
///
/// ## Field semantics
/// - `grace`: after a shutdown signal, maximum wait for run operations to
///   settle once the shutdown hooks have been called (`0s` = wait forever).
///
/// ## Notes
/// Fields are public. Prefer the helper accessors over checking sentinel
/// values inline.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time to wait for components to settle during signal-driven
    /// teardown.
    ///
    /// When the wait exceeds `grace`, [`App::run`](crate::App::run) returns
    /// [`RuntimeError::GraceExceeded`](crate::RuntimeError::GraceExceeded)
    /// naming the components that never settled. `Duration::ZERO` disables
    /// the deadline.
    pub grace: Duration,
}

impl Config {
    /// Returns the teardown deadline as an `Option`.
    ///
    /// - `None` → wait indefinitely
    /// - `Some(d)` → wait at most `d`
    #[inline]
    pub fn grace_limit(&self) -> Option<Duration> {
        if self.grace == Duration::ZERO {
            None
        } else {
            Some(self.grace)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `grace = 0s` (no teardown deadline)
    fn default() -> Self {
        Self {
            grace: Duration::ZERO,
        }
    }
}
