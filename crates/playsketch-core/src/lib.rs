//! PlaySketch Core Library
//!
//! Platform-agnostic data structures and editing logic for the PlaySketch
//! play designer: field geometry, the element model, snapping, the canvas
//! interaction state machine, undo/redo and persistence.

pub mod canvas;
pub mod config;
pub mod document;
pub mod elements;
pub mod field;
pub mod history;
pub mod input;
pub mod snap;
pub mod storage;
pub mod tools;
pub mod view;

pub use canvas::{Canvas, DragState, Interaction};
pub use config::{ConfigError, EditorConfig};
pub use document::{DocumentError, Play, PlayId, Playbook, parse_plays};
pub use elements::{Element, ElementId, ElementKind, ElementPatch, Rgba, StrokeStyle};
pub use field::{FieldSize, compute_field_size};
pub use history::History;
pub use input::{KeyCommand, KeyPress, Modifiers, PointerEvent};
pub use snap::{SNAP_RADIUS, SnapResult, SnapTarget, SnapTargetKind, find_snap_point, snap_to_yard_line};
pub use storage::{PLAYBOOK_KEY, Storage, StorageError, load_playbook, save_playbook};
pub use tools::{Draft, ToolKind, ToolManager, ToolStyle};
pub use view::ViewTransform;
