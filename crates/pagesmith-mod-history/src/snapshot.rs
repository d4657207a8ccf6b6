/// A single recorded state in the history log.

/// One entry in the history: a full copy of the state plus bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    /// The recorded state.
    pub state: T,
    /// Monotonic sequence number assigned by the `SnapshotHistory`.
    pub seq: u64,
    /// Short name of the operation that produced this state
    /// (e.g. "Create element").
    pub label: String,
}

impl<T> Snapshot<T> {
    /// Creates a snapshot.
    pub fn new(state: T, seq: u64, label: impl Into<String>) -> Self {
        Self {
            state,
            seq,
            label: label.into(),
        }
    }
}
