//! Province → municipality → sector → district → neighborhood picker.

pub mod catalog;
pub mod hierarchy;
pub mod selector;

pub use catalog::LocationCatalog;
pub use hierarchy::{save_hierarchy, HierarchyDraft, HierarchySaveError, LevelDraft, SavedLevel};
pub use selector::{
    derive_child_options, LocationLevel, LocationSelection, SelectionError, SelectorView,
};
