/// Local key-value store for saved pages, backed by redb.
///
/// Page documents are stored as raw JSON text keyed by slot name, so the
/// stored blob is exactly what `export` produces. A small bincode record per
/// slot keeps listing information (page name, element count, save time)
/// readable without parsing the document.
use std::path::Path;

use anyhow::{Context, Result};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

/// Page slot table: slot key → JSON text of the page.
const PAGE_SLOTS: TableDefinition<&str, &str> = TableDefinition::new("page_slots");

/// Slot metadata table: slot key → bincode(`SlotMeta`).
const SLOT_META: TableDefinition<&str, &[u8]> = TableDefinition::new("slot_meta");

/// Listing information recorded next to each saved page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMeta {
    pub page_id: String,
    pub page_name: String,
    pub element_count: usize,
    /// Milliseconds since the Unix epoch.
    pub saved_at_ms: i64,
}

/// Persistence layer for saved pages.
pub struct PageStore {
    db: Database,
}

impl std::fmt::Debug for PageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStore").finish()
    }
}

impl PageStore {
    /// Opens or creates the page database at `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create data directory: {}", parent.display())
                })?;
            }
        }

        let db = Database::create(path)
            .with_context(|| format!("Failed to open page database: {}", path.display()))?;

        // Ensure tables exist
        let write_txn = db
            .begin_write()
            .context("Failed to begin initial page store transaction")?;
        {
            let _ = write_txn
                .open_table(PAGE_SLOTS)
                .context("Failed to create page_slots table")?;
            let _ = write_txn
                .open_table(SLOT_META)
                .context("Failed to create slot_meta table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initial page store transaction")?;

        Ok(Self { db })
    }

    /// Writes `json` under `key`, replacing whatever was there.
    pub fn save_slot(&self, key: &str, json: &str, meta: &SlotMeta) -> Result<()> {
        let meta_bytes = bincode::serialize(meta).context("Failed to serialize slot metadata")?;

        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut slots = write_txn
                .open_table(PAGE_SLOTS)
                .context("Failed to open page_slots table")?;
            slots
                .insert(key, json)
                .context("Failed to insert page slot")?;
        }
        {
            let mut metas = write_txn
                .open_table(SLOT_META)
                .context("Failed to open slot_meta table")?;
            metas
                .insert(key, meta_bytes.as_slice())
                .context("Failed to insert slot metadata")?;
        }
        write_txn.commit().context("Failed to commit page slot")?;
        Ok(())
    }

    /// Loads the JSON stored under `key`, or `None` if the slot is empty.
    pub fn load_slot(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(PAGE_SLOTS)
            .context("Failed to open page_slots table")?;

        match table.get(key).context("Failed to read page slot")? {
            Some(guard) => Ok(Some(guard.value().to_string())),
            None => Ok(None),
        }
    }

    /// Loads the metadata for `key`, or `None` if the slot is empty.
    pub fn load_meta(&self, key: &str) -> Result<Option<SlotMeta>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(SLOT_META)
            .context("Failed to open slot_meta table")?;

        match table.get(key).context("Failed to read slot metadata")? {
            Some(guard) => {
                let meta: SlotMeta = bincode::deserialize(guard.value())
                    .context("Failed to deserialize slot metadata")?;
                Ok(Some(meta))
            }
            None => Ok(None),
        }
    }

    /// Removes a slot and its metadata. Returns whether the slot existed.
    pub fn remove_slot(&self, key: &str) -> Result<bool> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        let existed;
        {
            let mut slots = write_txn
                .open_table(PAGE_SLOTS)
                .context("Failed to open page_slots table")?;
            existed = slots
                .remove(key)
                .context("Failed to remove page slot")?
                .is_some();
        }
        {
            let mut metas = write_txn
                .open_table(SLOT_META)
                .context("Failed to open slot_meta table")?;
            metas
                .remove(key)
                .context("Failed to remove slot metadata")?;
        }
        write_txn.commit().context("Failed to commit slot removal")?;
        Ok(existed)
    }

    /// Lists all slot keys, in key order.
    pub fn list_slots(&self) -> Result<Vec<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(PAGE_SLOTS)
            .context("Failed to open page_slots table")?;

        let mut keys = Vec::new();
        for entry in table.iter().context("Failed to iterate page_slots")? {
            let (key_guard, _) = entry.context("Failed to read page slot entry")?;
            keys.push(key_guard.value().to_string());
        }
        Ok(keys)
    }
}
