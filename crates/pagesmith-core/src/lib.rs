//! Page-builder document core.
//!
//! An [`EditorStore`] owns one page document (an ordered list of block
//! elements), the editor's selection and mode flags, and a bounded
//! undo/redo log of page snapshots. Every structural mutation keeps element
//! positions dense and records a snapshot.

pub mod error;
pub mod history;
pub mod model;
pub mod props;
pub mod store;

pub use error::StoreError;
pub use model::{ElementId, ElementUpdate, PageData, PageElement, PageMetadata, Props};
pub use props::PropsError;
pub use store::{parse_page, EditorStore};
