/// Linear undo/redo history of full-state snapshots.
///
/// Provides a `SnapshotHistory` that records a deep copy of the editor state
/// after every mutation and walks back and forth over that log. The log is
/// bounded; the oldest snapshots are evicted first once the cap is reached.
/// History lives in memory only and is not persisted across sessions.
pub mod config;
pub mod history;
pub mod snapshot;

pub use config::HistoryConfig;
pub use history::SnapshotHistory;
pub use snapshot::Snapshot;
