//! Bounded undo ring.

use std::collections::VecDeque;

use crate::core::Snapshot;

/// Most recent settled snapshots, newest first.
///
/// Pushing past `depth` drops the oldest entry.
#[derive(Clone, Debug, Default)]
pub struct UndoHistory {
    depth: usize,
    snapshots: VecDeque<Snapshot>,
}

impl UndoHistory {
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            snapshots: VecDeque::with_capacity(depth),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.depth == 0 {
            return;
        }
        self.snapshots.push_front(snapshot);
        self.snapshots.truncate(self.depth);
    }

    /// Take the newest snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_front()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
