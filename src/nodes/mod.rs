//! Node model for the workflow canvas

pub mod graph;
pub mod node;
pub mod serde_egui;

pub use graph::{Connection, ConnectionId, FlowGraph, GraphError};
pub use node::{Node, NodeFlags, NodeId, NodeKind, NodeStatus};
