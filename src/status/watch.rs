//! One-shot status watchers.
//!
//! A watcher is a single-fire signal tied to one component and one target
//! [`Status`]. Waiters park on a `tokio::sync::oneshot` channel; the entry
//! fires every parked sender for a status the moment that status is stored.
//!
//! ## Rules
//! - **No lost wakeups.** [`WatcherTable::watch`] re-reads the status cell
//!   *under the table lock* and fires immediately when the current status
//!   already satisfies the target. Transitions store the new status *before*
//!   taking the lock to drain, so a watcher observes either the new status or
//!   the drain, never neither.
//! - Senders are detached under the lock but fired outside it.
//! - A fired slot is consumed: later watchers for the same status park again
//!   and wait for the next arrival (which, for terminal statuses, never
//!   comes; they are satisfied immediately instead).

use std::collections::HashMap;
use std::sync::RwLock;

use tokio::sync::oneshot;

use super::{Status, StatusCell};

/// # One-shot handle resolving when a component reaches a target status.
///
/// Created by [`ComponentEntry::watch_status`](crate::ComponentEntry::watch_status).
/// Await [`wait`](StatusWatch::wait) to park until the status arrives.
#[derive(Debug)]
pub struct StatusWatch {
    rx: oneshot::Receiver<()>,
}

impl StatusWatch {
    /// Waits until the target status is reached.
    ///
    /// Returns `true` when the status arrived, `false` when the component
    /// entry was discarded (replaced in the registry) before ever reaching
    /// it. A discarded watcher will never fire; resolving with `false` lets
    /// the caller distinguish the two.
    pub async fn wait(self) -> bool {
        self.rx.await.is_ok()
    }
}

/// Parked senders, keyed by the status they wait for.
pub(crate) struct WatcherTable {
    slots: RwLock<HashMap<Status, Vec<oneshot::Sender<()>>>>,
}

impl WatcherTable {
    pub(crate) fn new() -> Self {
        WatcherTable {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a watcher for `target`, firing it immediately when the
    /// status in `cell` already satisfies it.
    ///
    /// The cell is read while the table lock is held, so a transition racing
    /// with this call either fires the parked sender during its drain or is
    /// observed by the immediate check. See the module rules.
    pub(crate) fn watch(&self, cell: &StatusCell, target: Status) -> StatusWatch {
        let (tx, rx) = oneshot::channel();
        {
            let mut slots = self.slots.write().unwrap();
            if cell.load().satisfies(target) {
                drop(slots);
                let _ = tx.send(());
            } else {
                slots.entry(target).or_default().push(tx);
            }
        }
        StatusWatch { rx }
    }

    /// Fires and consumes every watcher parked on `reached`.
    ///
    /// The caller must have stored `reached` in the status cell first.
    pub(crate) fn fire(&self, reached: Status) {
        let drained = self.slots.write().unwrap().remove(&reached);
        if let Some(senders) = drained {
            for tx in senders {
                let _ = tx.send(());
            }
        }
    }
}
