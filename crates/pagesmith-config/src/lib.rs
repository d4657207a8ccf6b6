pub mod config;
pub mod storage;

pub use config::{resolve_data_dir, AppConfig};
pub use storage::{PageStore, SlotMeta};
