//! Error types for the editor store.

use thiserror::Error;

use crate::model::ElementId;
use crate::props::PropsError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No page is loaded")]
    NoPage,

    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Index {index} is out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Page edits are disabled while preview mode is on")]
    PreviewMode,

    #[error("Failed to parse page JSON: {0}")]
    Import(#[from] serde_json::Error),

    #[error("Invalid page document: {0}")]
    InvalidDocument(String),

    #[error("Property error: {0}")]
    Props(#[from] PropsError),
}
