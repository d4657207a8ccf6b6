/// Configuration for the snapshot history.

/// Maximum number of snapshots kept in the log before the oldest
/// entries are evicted.
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// Configuration for the history system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Max snapshots retained (the current state included).
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl HistoryConfig {
    /// Creates a config with the given cap. A cap of zero is raised to one,
    /// since the log always holds the current state.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
        }
    }
}
