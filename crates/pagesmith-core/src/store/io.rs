//! JSON export/import and saving to the local page store.
//!
//! The exported text is the pretty-printed `PageData` JSON; the same text is
//! written to the page store under the configured slot key. Imports replace
//! the page wholesale or not at all.

use anyhow::{Context, Result};
use chrono::Utc;
use pagesmith_config::{PageStore, SlotMeta};

use crate::error::StoreError;
use crate::model::PageData;

use super::EditorStore;

/// Parses and validates a page document.
///
/// Element ids must be unique. Positions are rewritten to match element
/// order.
pub fn parse_page(text: &str) -> Result<PageData, StoreError> {
    let mut page: PageData = serde_json::from_str(text)?;
    if let Some(id) = page.duplicate_id() {
        return Err(StoreError::InvalidDocument(format!(
            "duplicate element id {id}"
        )));
    }
    page.renumber();
    Ok(page)
}

impl EditorStore {
    /// Returns the current page as pretty-printed JSON, or an empty string
    /// when no page is loaded.
    pub fn export_page(&self) -> String {
        let Some(page) = &self.current_page else {
            return String::new();
        };
        match serde_json::to_string_pretty(page) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize page {}: {e}", page.id);
                String::new()
            }
        }
    }

    /// Replaces the current page with the document in `text`.
    ///
    /// On failure the error is logged and returned, and the store is left
    /// exactly as it was.
    pub fn import_page(&mut self, text: &str) -> Result<(), StoreError> {
        match parse_page(text) {
            Ok(page) => {
                self.replace_page(page, "Import page");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Rejected page import: {e}");
                Err(e)
            }
        }
    }

    /// Writes the current page to the configured slot of `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if no page is loaded or the write fails.
    pub fn save_page(&self, store: &PageStore) -> Result<()> {
        let page = self.current_page.as_ref().ok_or(StoreError::NoPage)?;
        let json = serde_json::to_string_pretty(page).context("Failed to serialize page")?;
        let meta = SlotMeta {
            page_id: page.id.clone(),
            page_name: page.name.clone(),
            element_count: page.elements.len(),
            saved_at_ms: Utc::now().timestamp_millis(),
        };
        let key = &self.config.storage_key;
        store
            .save_slot(key, &json, &meta)
            .with_context(|| format!("Failed to save page to slot {key}"))?;
        tracing::info!(
            slot = %key,
            page_id = %page.id,
            change = self.history.current().map(|s| s.label.as_str()).unwrap_or("none"),
            "saved page"
        );
        Ok(())
    }

    /// Loads the page saved in the configured slot of `store`.
    ///
    /// The loaded page becomes the only history snapshot. Returns `false`,
    /// leaving the store untouched, when the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the saved text is not a valid
    /// page document. The store is left untouched in both cases.
    pub fn load_page(&mut self, store: &PageStore) -> Result<bool> {
        let key = self.config.storage_key.clone();
        let Some(json) = store
            .load_slot(&key)
            .with_context(|| format!("Failed to read slot {key}"))?
        else {
            return Ok(false);
        };
        let page =
            parse_page(&json).with_context(|| format!("Slot {key} does not hold a valid page"))?;
        self.history.clear();
        self.replace_page(page, "Load page");
        tracing::info!(slot = %key, "loaded saved page");
        Ok(true)
    }
}
