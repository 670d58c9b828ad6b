//! Shared handle on the latest status snapshot.
//!
//! The status-fetch layer owns the writes. Licensing code only calls `snapshot()`.

use std::sync::{Arc, RwLock};

use super::snapshot::StatusSnapshot;
use crate::ignore_poison::IgnorePoisonRw;

#[derive(Debug, Default)]
pub struct StatusStore {
    current: RwLock<Arc<StatusSnapshot>>,
}

impl StatusStore {
    pub fn new(snapshot: StatusSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The latest snapshot. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<StatusSnapshot> {
        self.current.read_ignore_poison().clone()
    }

    /// Swaps in a new snapshot, as after a status fetch.
    pub fn replace(&self, snapshot: StatusSnapshot) {
        *self.current.write_ignore_poison() = Arc::new(snapshot);
    }

    /// Applies `f` to a copy of the current snapshot and publishes the result.
    pub fn update(&self, f: impl FnOnce(&mut StatusSnapshot)) {
        let mut guard = self.current.write_ignore_poison();
        let mut next = StatusSnapshot::clone(&guard);
        f(&mut next);
        *guard = Arc::new(next);
    }
}
