//! Lifecycle status values.

use std::fmt;

/// # Lifecycle status of a registered component.
///
/// Every component starts at [`Status::Unknown`] and moves through the other
/// states as its run operation progresses:
///
/// ```text
///                +--> Ready ---> Finished
///                |                  |
///  Unknown ------+--> RunFailed    |
///     |          |                 |
///     |          +--> Finished     |
///     |                            v
///     +-------------------------> Shutdown   (terminal, forced)
/// ```
///
/// ## Rules
/// - [`Status::Shutdown`] is terminal: once stored it is never overwritten,
///   regardless of what the component's run operation does afterwards.
/// - [`Status::Finished`] implies the component was also ready: a finished run
///   satisfies waiters parked on [`Status::Ready`], and, having completed, it
///   satisfies waiters parked on [`Status::Shutdown`] as well.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Initial state: the run operation has not reported anything yet.
    Unknown = 0,
    /// The component signaled readiness and its run operation is still active.
    Ready = 1,
    /// The run operation returned an error or panicked.
    RunFailed = 2,
    /// The run operation returned successfully.
    Finished = 3,
    /// The component was shut down. Terminal.
    Shutdown = 4,
}

impl Status {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unknown => "unknown",
            Status::Ready => "ready",
            Status::RunFailed => "run_failed",
            Status::Finished => "finished",
            Status::Shutdown => "shutdown",
        }
    }

    /// Returns `true` if a component currently at `self` satisfies a waiter
    /// parked on `target`.
    ///
    /// Besides the exact match, [`Status::Finished`] satisfies waiters for
    /// [`Status::Ready`] and [`Status::Shutdown`]: a completed run was
    /// necessarily up, and there is nothing left to stop.
    ///
    /// # Example
    /// ```
    /// use muster::Status;
    ///
    /// assert!(Status::Finished.satisfies(Status::Ready));
    /// assert!(Status::Finished.satisfies(Status::Shutdown));
    /// assert!(!Status::Ready.satisfies(Status::Finished));
    /// ```
    pub fn satisfies(self, target: Status) -> bool {
        self == target
            || (self == Status::Finished
                && matches!(target, Status::Ready | Status::Shutdown))
    }

    pub(crate) fn from_raw(raw: u8) -> Status {
        match raw {
            0 => Status::Unknown,
            1 => Status::Ready,
            2 => Status::RunFailed,
            3 => Status::Finished,
            4 => Status::Shutdown,
            _ => unreachable!("invalid status discriminant: {raw}"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfies_exact_match() {
        for status in [
            Status::Unknown,
            Status::Ready,
            Status::RunFailed,
            Status::Finished,
            Status::Shutdown,
        ] {
            assert!(status.satisfies(status));
        }
    }

    #[test]
    fn test_finished_implies_ready_and_shutdown() {
        assert!(Status::Finished.satisfies(Status::Ready));
        assert!(Status::Finished.satisfies(Status::Shutdown));
        assert!(!Status::Finished.satisfies(Status::RunFailed));
        assert!(!Status::Finished.satisfies(Status::Unknown));
    }

    #[test]
    fn test_no_other_implications() {
        assert!(!Status::Ready.satisfies(Status::Finished));
        assert!(!Status::Shutdown.satisfies(Status::Finished));
        assert!(!Status::RunFailed.satisfies(Status::Ready));
        assert!(!Status::Unknown.satisfies(Status::Ready));
    }

    #[test]
    fn test_raw_round_trip() {
        for status in [
            Status::Unknown,
            Status::Ready,
            Status::RunFailed,
            Status::Finished,
            Status::Shutdown,
        ] {
            assert_eq!(Status::from_raw(status as u8), status);
        }
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(Status::RunFailed.to_string(), "run_failed");
        assert_eq!(Status::Ready.as_str(), "ready");
    }
}
