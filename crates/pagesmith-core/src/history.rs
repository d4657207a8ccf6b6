// Re-exports from pagesmith-mod-history and the bridge from app config.
pub use pagesmith_mod_history::{HistoryConfig, Snapshot, SnapshotHistory};

use pagesmith_config::AppConfig;

use crate::model::PageData;

/// Undo/redo log of whole-page snapshots.
pub type PageHistory = SnapshotHistory<PageData>;

/// History settings derived from the application config.
pub fn history_config(config: &AppConfig) -> HistoryConfig {
    HistoryConfig::with_max_entries(config.history_limit)
}
