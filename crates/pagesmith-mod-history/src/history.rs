/// Linear undo/redo log over full-state snapshots.
///
/// The log is a flat sequence of snapshots with a cursor (`index`) pointing
/// at the snapshot that matches the live state. Recording a new snapshot
/// drops everything after the cursor, so there is exactly one timeline.
use std::collections::VecDeque;

use crate::config::HistoryConfig;
use crate::snapshot::Snapshot;

/// Bounded history of snapshots for a single editable state.
pub struct SnapshotHistory<T> {
    /// Snapshots ordered oldest first.
    entries: VecDeque<Snapshot<T>>,
    /// Position of the snapshot matching the live state.
    /// Meaningless while `entries` is empty.
    index: usize,
    /// Next sequence number to assign.
    next_seq: u64,
    /// Configuration parameters.
    config: HistoryConfig,
}

impl<T> std::fmt::Debug for SnapshotHistory<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotHistory")
            .field("len", &self.entries.len())
            .field("index", &self.index)
            .field("next_seq", &self.next_seq)
            .field("max_entries", &self.config.max_entries)
            .finish()
    }
}

impl<T: Clone> Default for SnapshotHistory<T> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<T: Clone> SnapshotHistory<T> {
    /// Creates an empty history.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            entries: VecDeque::new(),
            index: 0,
            next_seq: 0,
            config,
        }
    }

    /// Records a copy of `state` as the newest snapshot.
    ///
    /// Any redo entries past the cursor are discarded. When the log grows
    /// past `max_entries` the oldest snapshots are evicted.
    pub fn record(&mut self, label: impl Into<String>, state: &T) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }

        let snapshot = Snapshot::new(state.clone(), self.next_seq, label);
        self.next_seq += 1;
        self.entries.push_back(snapshot);

        let max = self.config.max_entries.max(1);
        while self.entries.len() > max {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::trace!(seq = evicted.seq, "evicted oldest history snapshot");
            }
        }
        self.index = self.entries.len() - 1;
    }

    /// Steps back one snapshot.
    ///
    /// Returns the state to restore, or `None` when already at the oldest
    /// snapshot.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index).map(|s| &s.state)
    }

    /// Steps forward one snapshot.
    ///
    /// Returns the state to restore, or `None` when already at the newest
    /// snapshot.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index).map(|s| &s.state)
    }

    /// Whether there is an older snapshot to step back to.
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    /// Whether there is a newer snapshot to step forward to.
    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.index + 1 < self.entries.len()
    }

    /// Label of the operation that `undo` would revert.
    pub fn undo_label(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.entries.get(self.index).map(|s| s.label.as_str())
    }

    /// Label of the operation that `redo` would reapply.
    pub fn redo_label(&self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.entries.get(self.index + 1).map(|s| s.label.as_str())
    }

    /// The snapshot matching the live state, if any.
    pub fn current(&self) -> Option<&Snapshot<T>> {
        self.entries.get(self.index)
    }

    /// Number of snapshots in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, or `None` when the log is empty.
    pub fn index(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.index)
        }
    }

    /// Iterates over the snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot<T>> {
        self.entries.iter()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
    }
}
