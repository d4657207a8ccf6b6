//! Element mutations.
//!
//! Every successful mutation leaves positions dense (`0..len` in array
//! order), refreshes `updated_at`, and records one history snapshot. Failed
//! calls leave the page and the history untouched.

use serde_json::Value;

use crate::error::StoreError;
use crate::model::{ElementId, ElementUpdate, PageElement, Props};
use crate::props;

use super::EditorStore;

impl EditorStore {
    /// Inserts a new block and selects it.
    ///
    /// Appends when `position` is `None`; otherwise inserts at that index
    /// (clamped to the element count) and shifts later elements right.
    pub fn create_element(
        &mut self,
        element_type: impl Into<String>,
        props: Option<Props>,
        position: Option<usize>,
    ) -> Result<ElementId, StoreError> {
        let page = self.editable_page()?;
        let id = ElementId::generate();
        let element = PageElement::new(id.clone(), element_type, props.unwrap_or_default());

        let len = page.elements.len();
        let index = position.map_or(len, |p| p.min(len));
        page.elements.insert(index, element);
        page.renumber();

        self.selected_element = Some(id.clone());
        self.commit("Create element");
        Ok(id)
    }

    /// Appends several blocks as a single undo step and selects the last
    /// one. Used when applying a multi-block template.
    pub fn insert_blocks<I, S>(&mut self, blocks: I) -> Result<Vec<ElementId>, StoreError>
    where
        I: IntoIterator<Item = (S, Props)>,
        S: Into<String>,
    {
        let page = self.editable_page()?;
        let mut ids = Vec::new();
        for (element_type, props) in blocks {
            let id = ElementId::generate();
            page.elements
                .push(PageElement::new(id.clone(), element_type, props));
            ids.push(id);
        }
        if ids.is_empty() {
            return Ok(ids);
        }
        page.renumber();

        self.selected_element = ids.last().cloned();
        self.commit("Apply template");
        Ok(ids)
    }

    /// Shallow-merges `update` into the element.
    pub fn update_element(
        &mut self,
        id: &ElementId,
        update: ElementUpdate,
    ) -> Result<(), StoreError> {
        let page = self.editable_page()?;
        let element = page
            .element_mut(id)
            .ok_or_else(|| StoreError::ElementNotFound(id.clone()))?;
        update.apply_to(element);

        self.commit("Update element");
        Ok(())
    }

    /// Sets one nested prop addressed by a dotted path (e.g. `"cta.label"`),
    /// keeping the rest of the props intact.
    pub fn update_element_prop(
        &mut self,
        id: &ElementId,
        path: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let page = self.editable_page()?;
        let element = page
            .element_mut(id)
            .ok_or_else(|| StoreError::ElementNotFound(id.clone()))?;

        let mut next = element.props.clone();
        props::set_path(&mut next, path, value)?;
        element.props = next;

        self.commit("Update property");
        Ok(())
    }

    /// Reads one nested prop. `Ok(None)` when the path is absent.
    pub fn element_prop(&self, id: &ElementId, path: &str) -> Result<Option<&Value>, StoreError> {
        let page = self.current_page.as_ref().ok_or(StoreError::NoPage)?;
        let element = page
            .element(id)
            .ok_or_else(|| StoreError::ElementNotFound(id.clone()))?;
        Ok(props::get_path(&element.props, path)?)
    }

    /// Removes an element and returns it. Clears the selection if it pointed
    /// at the removed element.
    pub fn delete_element(&mut self, id: &ElementId) -> Result<PageElement, StoreError> {
        let page = self.editable_page()?;
        let index = page
            .index_of(id)
            .ok_or_else(|| StoreError::ElementNotFound(id.clone()))?;
        let removed = page.elements.remove(index);
        page.renumber();

        if self.selected_element.as_ref() == Some(id) {
            self.selected_element = None;
        }
        if self.dragged_element.as_ref() == Some(id) {
            self.dragged_element = None;
        }
        self.commit("Delete element");
        Ok(removed)
    }

    /// Copies an element directly after the original and selects the copy.
    pub fn duplicate_element(&mut self, id: &ElementId) -> Result<ElementId, StoreError> {
        let page = self.editable_page()?;
        let index = page
            .index_of(id)
            .ok_or_else(|| StoreError::ElementNotFound(id.clone()))?;
        let copy = page.elements[index].duplicate();
        let copy_id = copy.id.clone();
        page.elements.insert(index + 1, copy);
        page.renumber();

        self.selected_element = Some(copy_id.clone());
        self.commit("Duplicate element");
        Ok(copy_id)
    }

    /// Moves the element at `old_index` so it ends up at `new_index`
    /// (remove-then-insert, not a swap).
    pub fn reorder_elements(&mut self, old_index: usize, new_index: usize) -> Result<(), StoreError> {
        let page = self.editable_page()?;
        let len = page.elements.len();
        for index in [old_index, new_index] {
            if index >= len {
                return Err(StoreError::IndexOutOfRange { index, len });
            }
        }

        let moved = page.elements.remove(old_index);
        page.elements.insert(new_index, moved);
        page.renumber();

        self.commit("Reorder elements");
        Ok(())
    }
}
