//! PageCraft Core Library
//!
//! Platform-agnostic document model for the PageCraft page builder: the
//! element store with snapshot undo/redo, alignment guides for dragging, and
//! the local persistence boundary.

pub mod config;
pub mod element;
pub mod guides;
pub mod history;
pub mod storage;
pub mod store;

pub use config::{ConfigError, EditorConfig};
pub use element::{
    Element, ElementId, ElementKind, ElementProperties, GroupId, Layout, StateAcceptance, Style,
    TableData,
};
pub use guides::{
    DragSession, DragState, GUIDE_VISIBILITY_THRESHOLD, Guides, SNAP_THRESHOLD, SnapResult,
    VisibleGuide,
};
pub use history::History;
pub use storage::{DesignRecord, MemoryStorage, Storage, StorageError, Theme};
pub use store::{ElementStore, StateOutcome, StoreEvent};
