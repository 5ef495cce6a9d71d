//! FlowCanvas core library
//!
//! Node canvas model, placement arithmetic, and the mock services the editor
//! talks to. The eframe editor lives in [`editor`].

pub mod constants;
pub mod context;
pub mod editor;
pub mod i18n;
pub mod layout;
pub mod nodes;
pub mod services;
pub mod theme;

// Re-export commonly used types
pub use context::{AppContext, CanvasSettings, Locale, TextDirection, ThemeMode};
pub use editor::{CanvasEditor, Viewport};
pub use layout::{find_available_position, overlaps, snap, Placement, PlacementStrategy};
pub use nodes::{Connection, FlowGraph, GraphError, Node, NodeId, NodeKind, NodeStatus};
