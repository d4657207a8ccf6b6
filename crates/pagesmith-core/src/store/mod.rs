//! Editor store: the current page, editor UI state, and undo/redo history.
//!
//! An `EditorStore` is a plain value owned by the application and passed to
//! whatever drives it; several stores can coexist. Element mutations live in
//! the `elements` submodule and JSON import/export/save in `io`.

mod elements;
mod io;

pub use io::parse_page;

use pagesmith_config::AppConfig;

use crate::error::StoreError;
use crate::history::{history_config, PageHistory};
use crate::model::{ElementId, PageData, PageElement};

/// Owns one page document plus the editor state around it.
pub struct EditorStore {
    /// The page being edited, if any.
    current_page: Option<PageData>,
    /// Element shown in the property panel.
    selected_element: Option<ElementId>,
    /// Element currently being dragged (transient, UI only).
    dragged_element: Option<ElementId>,
    /// Whether the page is shown without editing chrome.
    is_preview_mode: bool,
    /// Whether the property panel is visible.
    show_property_panel: bool,
    /// Last block category picked in the block picker.
    current_category: Option<String>,
    /// Snapshots of `current_page` after each mutation.
    history: PageHistory,
    /// Configuration parameters.
    config: AppConfig,
}

impl std::fmt::Debug for EditorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorStore")
            .field("page_id", &self.current_page.as_ref().map(|p| &p.id))
            .field("elements", &self.elements().len())
            .field("selected_element", &self.selected_element)
            .field("is_preview_mode", &self.is_preview_mode)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorStore {
    /// Creates a store holding an empty default page, with default config.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Creates a store holding an empty page named after
    /// `config.default_page_name`. The empty page is the first history
    /// snapshot, so the first edit can be undone.
    pub fn with_config(config: AppConfig) -> Self {
        let page = PageData::new(config.default_page_name.clone());
        let mut store = Self::without_page(config);
        store.current_page = Some(page);
        store.save_history("Create page");
        store
    }

    /// Creates a store with no page loaded. Element operations fail with
    /// [`StoreError::NoPage`] until a page is set.
    pub fn without_page(config: AppConfig) -> Self {
        Self {
            current_page: None,
            selected_element: None,
            dragged_element: None,
            is_preview_mode: false,
            show_property_panel: true,
            current_category: None,
            history: PageHistory::new(history_config(&config)),
            config,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────

    pub fn current_page(&self) -> Option<&PageData> {
        self.current_page.as_ref()
    }

    /// Elements of the current page in order; empty when no page is loaded.
    pub fn elements(&self) -> &[PageElement] {
        self.current_page
            .as_ref()
            .map(|p| p.elements.as_slice())
            .unwrap_or(&[])
    }

    pub fn element(&self, id: &ElementId) -> Option<&PageElement> {
        self.current_page.as_ref().and_then(|p| p.element(id))
    }

    pub fn selected_element(&self) -> Option<&ElementId> {
        self.selected_element.as_ref()
    }

    pub fn dragged_element(&self) -> Option<&ElementId> {
        self.dragged_element.as_ref()
    }

    pub fn is_preview_mode(&self) -> bool {
        self.is_preview_mode
    }

    pub fn show_property_panel(&self) -> bool {
        self.show_property_panel
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn history(&self) -> &PageHistory {
        &self.history
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ── UI state ──────────────────────────────────────────────────────

    pub fn select_element(&mut self, id: Option<ElementId>) {
        self.selected_element = id;
    }

    pub fn set_dragged_element(&mut self, id: Option<ElementId>) {
        self.dragged_element = id;
    }

    /// Flips preview mode. Entering or leaving preview always clears the
    /// selection.
    pub fn toggle_preview_mode(&mut self) {
        self.is_preview_mode = !self.is_preview_mode;
        self.selected_element = None;
        tracing::debug!(preview = self.is_preview_mode, "toggled preview mode");
    }

    pub fn toggle_property_panel(&mut self) {
        self.show_property_panel = !self.show_property_panel;
    }

    pub fn set_current_category(&mut self, category: Option<String>) {
        self.current_category = category;
    }

    // ── Page replacement ──────────────────────────────────────────────

    /// Replaces the current page with a fresh empty page.
    pub fn create_new_page(&mut self, name: impl Into<String>) {
        let mut name = name.into();
        if name.trim().is_empty() {
            name = self.config.default_page_name.clone();
        }
        self.replace_page(PageData::new(name), "Create page");
    }

    /// Replaces the current page wholesale. Positions are renumbered to
    /// match element order.
    pub fn set_current_page(&mut self, page: PageData) {
        self.replace_page(page, "Set page");
    }

    fn replace_page(&mut self, mut page: PageData, label: &str) {
        page.renumber();
        tracing::debug!(page_id = %page.id, elements = page.elements.len(), "{label}");
        self.current_page = Some(page);
        self.selected_element = None;
        self.dragged_element = None;
        self.save_history(label);
    }

    // ── History ───────────────────────────────────────────────────────

    /// Steps back to the previous snapshot. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(page) = self.history.undo().cloned() else {
            return false;
        };
        self.current_page = Some(page);
        self.selected_element = None;
        true
    }

    /// Steps forward to the next snapshot. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(page) = self.history.redo().cloned() else {
            return false;
        };
        self.current_page = Some(page);
        self.selected_element = None;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Name of the operation `undo` would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    /// Name of the operation `redo` would reapply.
    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    /// Records the current page as the newest snapshot.
    fn save_history(&mut self, label: &str) {
        if let Some(page) = &self.current_page {
            self.history.record(label, page);
        }
    }

    // ── Mutation plumbing ─────────────────────────────────────────────

    /// The page, if it may be edited right now.
    fn editable_page(&mut self) -> Result<&mut PageData, StoreError> {
        if self.is_preview_mode && !self.config.allow_edits_in_preview {
            return Err(StoreError::PreviewMode);
        }
        self.current_page.as_mut().ok_or(StoreError::NoPage)
    }

    /// Finishes a document mutation: bumps `updated_at` and records history.
    fn commit(&mut self, label: &str) {
        if let Some(page) = &mut self.current_page {
            page.touch();
            tracing::debug!(page_id = %page.id, elements = page.elements.len(), "{label}");
        }
        self.save_history(label);
    }
}
