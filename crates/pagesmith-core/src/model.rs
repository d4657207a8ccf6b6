//! Page document model: placed block elements and the page that orders them.
//!
//! The JSON shape of these types is the persisted and exported format:
//! element kind is written as `type`, metadata timestamps as camelCase
//! RFC 3339 strings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form block configuration: string keys to arbitrary JSON values.
/// Keys keep their insertion order.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// Unique identifier of a placed element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(format!("element-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

fn default_true() -> bool {
    true
}

/// One placed block instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageElement {
    /// Assigned at creation, never changed.
    pub id: ElementId,
    /// Key into the external component-type registry (e.g. "hero1").
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub props: Props,
    /// Ordering key; always equals the element's index in the page.
    pub position: usize,
    /// When false the renderer skips the block.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// When true the UI blocks dragging and prop edits.
    #[serde(default)]
    pub locked: bool,
}

impl PageElement {
    /// Creates a visible, unlocked element. `position` is fixed up by the
    /// page once the element is inserted.
    pub fn new(id: ElementId, element_type: impl Into<String>, props: Props) -> Self {
        Self {
            id,
            element_type: element_type.into(),
            props,
            position: 0,
            visible: true,
            locked: false,
        }
    }

    /// Copies this element under a new id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: ElementId::generate(),
            ..self.clone()
        }
    }
}

/// Partial update of an element; `None` fields are left untouched.
///
/// `props` replaces the whole object. Use
/// [`EditorStore::update_element_prop`](crate::EditorStore::update_element_prop)
/// to change a single nested value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementUpdate {
    pub element_type: Option<String>,
    pub props: Option<Props>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
}

impl ElementUpdate {
    pub fn element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    pub fn props(mut self, props: Props) -> Self {
        self.props = Some(props);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.element_type.is_none()
            && self.props.is_none()
            && self.visible.is_none()
            && self.locked.is_none()
    }

    /// Shallow-merges the set fields into `element`.
    pub fn apply_to(self, element: &mut PageElement) {
        if let Some(element_type) = self.element_type {
            element.element_type = element_type;
        }
        if let Some(props) = self.props {
            element.props = props;
        }
        if let Some(visible) = self.visible {
            element.visible = visible;
        }
        if let Some(locked) = self.locked {
            element.locked = locked;
        }
    }
}

/// Descriptive page metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every document mutation.
    pub updated_at: DateTime<Utc>,
}

/// One page document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub elements: Vec<PageElement>,
    pub metadata: PageMetadata,
}

impl PageData {
    /// Creates an empty page titled after `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: format!("page-{}", Uuid::new_v4()),
            metadata: PageMetadata {
                title: name.clone(),
                description: String::new(),
                created_at: now,
                updated_at: now,
            },
            name,
            elements: Vec::new(),
        }
    }

    /// Refreshes `updated_at`.
    pub fn touch(&mut self) {
        self.metadata.updated_at = Utc::now();
    }

    /// Rewrites every element's position to its index.
    pub fn renumber(&mut self) {
        for (index, element) in self.elements.iter_mut().enumerate() {
            element.position = index;
        }
    }

    /// Whether positions form the dense sequence `0..len` in array order.
    pub fn positions_are_dense(&self) -> bool {
        self.elements
            .iter()
            .enumerate()
            .all(|(index, element)| element.position == index)
    }

    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    pub fn element(&self, id: &ElementId) -> Option<&PageElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut PageElement> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    /// First id that appears more than once, if any.
    pub fn duplicate_id(&self) -> Option<&ElementId> {
        let mut seen = std::collections::HashSet::new();
        self.elements
            .iter()
            .map(|e| &e.id)
            .find(|id| !seen.insert(*id))
    }
}
